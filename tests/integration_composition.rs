use quoteframe::compose::{
    resolve_fonts, resolve_frame_layout, resolve_frame_layout_by_name, Border, Background, URDU_FONT,
};
use quoteframe::style::{MAX_CAPTION_FONT_SIZE, MAX_FONT_SIZE, MIN_CAPTION_FONT_SIZE, MIN_FONT_SIZE};
use quoteframe::{
    apply_preset, compose, default_style, find_preset, presets, set_field, Color, Direction, Edit, FontPairing,
    FrameDesign, Language, Session, StyleField,
};

#[test]
fn preset_then_single_field_edit() {
    let midnight = find_preset("Midnight").unwrap();
    let s = Session::new()
        .apply(Edit::ApplyPreset(midnight))
        .apply(Edit::Style(StyleField::FontSize(40)));

    assert_eq!(s.style, set_field(apply_preset(midnight), StyleField::FontSize(40)));
    assert_eq!(s.style.background_color, midnight.style.background_color);
    assert_eq!(s.style.font_size, 40);
}

#[test]
fn preset_discards_earlier_edits() {
    let classic = find_preset("Classic").unwrap();
    let s = Session::new()
        .apply(Edit::Style(StyleField::BackgroundColor(Color::rgb(1, 2, 3))))
        .apply(Edit::Style(StyleField::FrameDesign(FrameDesign::FloatingGlass)))
        .apply(Edit::ApplyPreset(classic));
    assert_eq!(s.style, classic.style);
    assert_eq!(s.style, default_style());
}

#[test]
fn sizes_stay_in_range_for_any_input() {
    let mut s = Session::new();
    for v in (-200i64..=200).step_by(7) {
        s = s
            .apply(Edit::Style(StyleField::FontSize(v)))
            .apply(Edit::Style(StyleField::CaptionFontSize(v)));
        assert!((MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&s.style.font_size));
        assert!((MIN_CAPTION_FONT_SIZE..=MAX_CAPTION_FONT_SIZE).contains(&s.style.caption_font_size));
    }
}

#[test]
fn every_preset_is_renderable() {
    for p in presets() {
        let c = compose(&Session::new().apply(Edit::ApplyPreset(p)));
        assert_eq!(c.style, p.style);
        assert_eq!(c.layout.design, p.style.frame_design);
    }
}

#[test]
fn toggle_keeps_both_quotes() {
    let s = Session::new()
        .finish_generation(Ok("Generated line".into()))
        .apply(Edit::UseCustomQuote(true))
        .apply(Edit::CustomQuote("Typed line".into()));
    assert_eq!(compose(&s).quote_text, "Typed line");

    let s = s.apply(Edit::UseCustomQuote(false));
    assert_eq!(compose(&s).quote_text, "Generated line");
    assert_eq!(s.source.custom_quote, "Typed line");

    let s = s.apply(Edit::UseCustomQuote(true)).apply(Edit::CustomQuote(String::new()));
    assert_eq!(compose(&s).quote_text, "");
}

#[test]
fn urdu_script_overrides_quote_font_only() {
    let fonts = resolve_fonts(Language::Urdu, FontPairing::Script);
    assert_eq!(fonts.quote, URDU_FONT);
    assert_eq!(fonts.caption.class, "font-lato");

    let s = Session::new()
        .apply(Edit::Language(Language::Urdu))
        .apply(Edit::Style(StyleField::FontPairing(FontPairing::Script)));
    let c = compose(&s);
    assert_eq!(c.direction, Direction::Rtl);
    assert_eq!(c.fonts, fonts);
}

#[test]
fn roman_urdu_reads_left_to_right() {
    let s = Session::new().apply(Edit::Language(Language::RomanUrdu));
    let c = compose(&s);
    assert_eq!(c.direction, Direction::Ltr);
    assert_eq!(c.direction.as_str(), "ltr");
    assert_eq!(c.fonts.quote.class, "font-playfair");
}

#[test]
fn each_design_resolves_a_distinct_treatment() {
    let style = default_style();
    let layouts: Vec<_> = FrameDesign::ALL.iter().map(|d| resolve_frame_layout(*d, &style)).collect();
    for (i, a) in layouts.iter().enumerate() {
        for b in &layouts[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(matches!(layouts[0].border, Border::Gradient { .. }));
    assert!(matches!(layouts[1].border, Border::None));
    assert!(matches!(layouts[2].background, Background::Frosted { .. }));
    assert!(matches!(layouts[3].border, Border::Inset { .. }));
}

#[test]
fn unknown_design_name_falls_back_to_classic() {
    let style = default_style();
    assert_eq!(
        resolve_frame_layout_by_name("Holographic", &style),
        resolve_frame_layout(FrameDesign::Classic3D, &style)
    );
    assert_eq!(
        resolve_frame_layout_by_name("Floating Glass", &style).design,
        FrameDesign::FloatingGlass
    );
}

#[test]
fn elegant_border_follows_text_color() {
    let style = set_field(default_style(), StyleField::TextColor(Color::rgb(0x9f, 0x12, 0x39)));
    let layout = resolve_frame_layout(FrameDesign::ElegantBorder, &style);
    match layout.border {
        Border::Inset { color, .. } => assert_eq!((color.r, color.g, color.b), (0x9f, 0x12, 0x39)),
        other => panic!("unexpected border {:?}", other),
    }
}

#[test]
fn composition_reports_loading_while_generating() {
    let (pending, request) = Session::new().begin_generation().unwrap().unwrap();
    assert_eq!(request.topic, "Motivation");
    assert!(compose(&pending).loading);
    assert!(!compose(&pending.finish_generation(Ok("Done.".into()))).loading);
}

//! Composition resolution.
//!
//! Pure functions that turn the current session into the single render-ready
//! description used by both the live display and export.

use crate::session::Session;
use crate::style::{Color, FontPairing, FrameDesign, FrameStyle, Language};
use crate::upload::ImageHandle;
use serde::Serialize;

/// Accent used by the quote marks and the Classic 3D treatment (lime-400).
pub const ACCENT: Color = Color::rgb(0xa3, 0xe6, 0x35);
const ACCENT_DEEP: Color = Color::rgb(0x16, 0xa3, 0x4a);

/// The quote string for the active source. May be empty.
pub fn resolve_quote_text<'a>(use_custom: bool, custom_quote: &'a str, generated_quote: &'a str) -> &'a str {
    if use_custom {
        custom_quote
    } else {
        generated_quote
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

pub fn resolve_direction(language: Language) -> Direction {
    match language {
        Language::Urdu => Direction::Rtl,
        Language::English | Language::RomanUrdu => Direction::Ltr,
    }
}

/// A font as the renderer knows it: a class name plus its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontFace {
    pub class: &'static str,
    pub family: &'static str,
}

pub const URDU_FONT: FontFace = FontFace { class: "font-urdu", family: "Noto Nastaliq Urdu" };

/// (quote font, caption font) for a pairing.
pub fn pairing_fonts(pairing: FontPairing) -> (FontFace, FontFace) {
    match pairing {
        FontPairing::Serif => (
            FontFace { class: "font-playfair", family: "Playfair Display" },
            FontFace { class: "font-lora", family: "Lora" },
        ),
        FontPairing::SansSerif => (
            FontFace { class: "font-montserrat", family: "Montserrat" },
            FontFace { class: "font-open-sans", family: "Open Sans" },
        ),
        FontPairing::Script => (
            FontFace { class: "font-dancing-script", family: "Dancing Script" },
            FontFace { class: "font-lato", family: "Lato" },
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontClasses {
    pub quote: FontFace,
    pub caption: FontFace,
}

/// Urdu overrides only the quote font; the caption always follows the pairing.
pub fn resolve_fonts(language: Language, pairing: FontPairing) -> FontClasses {
    let (quote, caption) = pairing_fonts(pairing);
    let quote = if language == Language::Urdu { URDU_FONT } else { quote };
    FontClasses { quote, caption }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Border {
    None,
    /// Frame padding filled with a vertical gradient
    Gradient { from: Color, to: Color, width: u32 },
    /// Thin translucent outline
    Hairline { color: Color, width: u32 },
    /// Line drawn `inset` px inside the panel edge
    Inset { color: Color, width: u32, inset: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Background {
    Solid { color: Color },
    Frosted { color: Color, blur: u32 },
}

impl Background {
    pub fn color(&self) -> Color {
        match *self {
            Background::Solid { color } | Background::Frosted { color, .. } => color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shadow {
    pub offset_y: u32,
    pub blur: u32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImageRing {
    Gradient { from: Color, to: Color },
    Translucent { color: Color },
    Accent { color: Color },
}

/// Design-specific frame treatment consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLayout {
    pub design: FrameDesign,
    pub border: Border,
    pub background: Background,
    pub shadow: Shadow,
    pub corner_radius: u32,
    pub image_ring: ImageRing,
}

pub fn resolve_frame_layout(design: FrameDesign, style: &FrameStyle) -> FrameLayout {
    let bg = style.background_color;
    match design {
        FrameDesign::Classic3D => FrameLayout {
            design,
            border: Border::Gradient { from: ACCENT, to: ACCENT_DEEP, width: 8 },
            background: Background::Solid { color: bg },
            shadow: Shadow { offset_y: 20, blur: 25, color: Color::BLACK.with_opacity(0.35) },
            corner_radius: 16,
            image_ring: ImageRing::Gradient { from: ACCENT, to: ACCENT_DEEP },
        },
        FrameDesign::MinimalistShadow => FrameLayout {
            design,
            border: Border::None,
            background: Background::Solid { color: bg },
            shadow: Shadow { offset_y: 10, blur: 40, color: Color::BLACK.with_opacity(0.15) },
            corner_radius: 12,
            image_ring: ImageRing::Translucent { color: Color::WHITE.with_opacity(0.8) },
        },
        FrameDesign::FloatingGlass => FrameLayout {
            design,
            border: Border::Hairline { color: Color::WHITE.with_opacity(0.4), width: 1 },
            background: Background::Frosted { color: bg.with_opacity(0.7), blur: 16 },
            shadow: Shadow { offset_y: 24, blur: 48, color: Color::BLACK.with_opacity(0.25) },
            corner_radius: 24,
            image_ring: ImageRing::Translucent { color: Color::WHITE.with_opacity(0.6) },
        },
        FrameDesign::ElegantBorder => FrameLayout {
            design,
            border: Border::Inset { color: style.text_color.with_opacity(0.6), width: 2, inset: 10 },
            background: Background::Solid { color: bg },
            shadow: Shadow { offset_y: 4, blur: 8, color: Color::BLACK.with_opacity(0.1) },
            corner_radius: 4,
            image_ring: ImageRing::Accent { color: style.text_color.with_opacity(0.5) },
        },
    }
}

/// Layout for a design given by name. Names that match no design get the
/// Classic 3D treatment.
pub fn resolve_frame_layout_by_name(name: &str, style: &FrameStyle) -> FrameLayout {
    resolve_frame_layout(FrameDesign::from_name_or_default(name), style)
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Resolved quote, possibly empty
    pub quote_text: String,
    pub caption: String,
    pub direction: Direction,
    pub fonts: FontClasses,
    pub layout: FrameLayout,
    pub style: FrameStyle,
    pub image: Option<ImageHandle>,
    /// A generation call is outstanding
    pub loading: bool,
}

pub fn compose(session: &Session) -> Composition {
    let source = &session.source;
    let quote_text = resolve_quote_text(source.use_custom, &source.custom_quote, &source.generated_quote);
    Composition {
        quote_text: quote_text.to_string(),
        caption: session.caption.clone(),
        direction: resolve_direction(session.language),
        fonts: resolve_fonts(session.language, session.style.font_pairing),
        layout: resolve_frame_layout(session.style.frame_design, &session.style),
        style: session.style,
        image: session.image.clone(),
        loading: session.is_generating(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::default_style;

    #[test]
    fn quote_text_follows_toggle() {
        assert_eq!(resolve_quote_text(true, "A", "B"), "A");
        assert_eq!(resolve_quote_text(false, "A", "B"), "B");
        assert_eq!(resolve_quote_text(true, "", "B"), "");
    }

    #[test]
    fn direction_by_language() {
        assert_eq!(resolve_direction(Language::Urdu), Direction::Rtl);
        assert_eq!(resolve_direction(Language::English), Direction::Ltr);
        assert_eq!(resolve_direction(Language::RomanUrdu), Direction::Ltr);
    }

    #[test]
    fn urdu_overrides_quote_font_only() {
        let f = resolve_fonts(Language::Urdu, FontPairing::Script);
        assert_eq!(f.quote, URDU_FONT);
        assert_eq!(f.caption, pairing_fonts(FontPairing::Script).1);

        let f = resolve_fonts(Language::RomanUrdu, FontPairing::Script);
        assert_eq!(f.quote, pairing_fonts(FontPairing::Script).0);
    }

    #[test]
    fn every_pairing_maps_to_distinct_fonts() {
        let quotes: Vec<_> = FontPairing::ALL.iter().map(|p| pairing_fonts(*p).0).collect();
        for (i, a) in quotes.iter().enumerate() {
            for b in &quotes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn layouts_are_distinct_and_stable() {
        let style = default_style();
        let layouts: Vec<_> = FrameDesign::ALL.iter().map(|d| resolve_frame_layout(*d, &style)).collect();
        for (i, a) in layouts.iter().enumerate() {
            assert_eq!(*a, resolve_frame_layout(a.design, &style));
            for b in &layouts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn image_ring_per_design() {
        let style = default_style();
        assert!(matches!(
            resolve_frame_layout(FrameDesign::Classic3D, &style).image_ring,
            ImageRing::Gradient { .. }
        ));
        assert!(matches!(
            resolve_frame_layout(FrameDesign::MinimalistShadow, &style).image_ring,
            ImageRing::Translucent { .. }
        ));
        assert!(matches!(
            resolve_frame_layout(FrameDesign::FloatingGlass, &style).image_ring,
            ImageRing::Translucent { .. }
        ));
        match resolve_frame_layout(FrameDesign::ElegantBorder, &style).image_ring {
            ImageRing::Accent { color } => {
                assert_eq!((color.r, color.g, color.b), (style.text_color.r, style.text_color.g, style.text_color.b));
                assert!(color.a < 0xff);
            }
            other => panic!("unexpected ring {:?}", other),
        }
    }

    #[test]
    fn unknown_design_name_falls_back_to_classic() {
        let style = default_style();
        let fallback = resolve_frame_layout_by_name("Neon Tube", &style);
        assert_eq!(fallback, resolve_frame_layout(FrameDesign::Classic3D, &style));
        let glass = resolve_frame_layout_by_name("Floating Glass", &style);
        assert_eq!(glass.design, FrameDesign::FloatingGlass);
    }
}

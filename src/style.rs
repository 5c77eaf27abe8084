//! Style model: the enumerated domains and the tunable frame style.
//!
//! Every `FrameStyle` reachable through [`default_style`], the preset catalog
//! or [`set_field`] satisfies the documented ranges for its numeric fields.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 64;
pub const MIN_CAPTION_FONT_SIZE: u32 = 8;
pub const MAX_CAPTION_FONT_SIZE: u32 = 32;

/// An RGBA color. Parsed from and serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled to `opacity` (0.0..=1.0).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || Error::ValidationError(format!("Invalid color '{}'", s));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Color::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Quote language. Decides text direction and the quote font override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Urdu,
    #[serde(rename = "Roman Urdu")]
    RomanUrdu,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Urdu, Language::RomanUrdu];

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Urdu => "Urdu",
            Language::RomanUrdu => "Roman Urdu",
        }
    }
}

/// Font pairing, mapped to a (quote font, caption font) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontPairing {
    #[default]
    Serif,
    #[serde(rename = "Sans-Serif")]
    SansSerif,
    Script,
}

impl FontPairing {
    pub const ALL: [FontPairing; 3] = [FontPairing::Serif, FontPairing::SansSerif, FontPairing::Script];

    pub fn name(&self) -> &'static str {
        match self {
            FontPairing::Serif => "Serif",
            FontPairing::SansSerif => "Sans-Serif",
            FontPairing::Script => "Script",
        }
    }
}

/// Frame decoration strategy.
///
/// Deserializing an unrecognized name yields `Classic3D` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FrameDesign {
    #[default]
    Classic3D,
    MinimalistShadow,
    FloatingGlass,
    ElegantBorder,
}

impl FrameDesign {
    pub const ALL: [FrameDesign; 4] = [
        FrameDesign::Classic3D,
        FrameDesign::MinimalistShadow,
        FrameDesign::FloatingGlass,
        FrameDesign::ElegantBorder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FrameDesign::Classic3D => "Classic 3D",
            FrameDesign::MinimalistShadow => "Minimalist Shadow",
            FrameDesign::FloatingGlass => "Floating Glass",
            FrameDesign::ElegantBorder => "Elegant Border",
        }
    }

    /// Lenient lookup: names that match no design fall back to Classic 3D.
    pub fn from_name_or_default(name: &str) -> FrameDesign {
        match name.parse::<FrameDesign>() {
            Ok(d) => d,
            _ => {
                log::warn!("unknown frame design {:?}, using {}", name, FrameDesign::Classic3D.name());
                FrameDesign::Classic3D
            }
        }
    }
}

impl From<String> for FrameDesign {
    fn from(s: String) -> Self {
        FrameDesign::from_name_or_default(&s)
    }
}

impl From<FrameDesign> for String {
    fn from(d: FrameDesign) -> Self {
        d.name().to_string()
    }
}

macro_rules! named_enum {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = Error;
            /// Accepts the display name, case-insensitively, ignoring spaces, dashes and underscores.
            fn from_str(s: &str) -> Result<Self> {
                let key = normalize_name(s);
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize_name(v.name()) == key)
                    .ok_or_else(|| Error::ValidationError(format!("Unknown {} '{}'", $what, s)))
            }
        }
    };
}

named_enum!(Language, "language");
named_enum!(FontPairing, "font pairing");
named_enum!(FrameDesign, "frame design");

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The full set of visually tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStyle {
    pub background_color: Color,
    pub text_color: Color,
    pub font_size: u32,
    pub caption_font_size: u32,
    pub font_pairing: FontPairing,
    pub frame_design: FrameDesign,
}

impl FrameStyle {
    /// Whether both numeric fields lie in their documented ranges.
    pub fn is_valid(&self) -> bool {
        (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size)
            && (MIN_CAPTION_FONT_SIZE..=MAX_CAPTION_FONT_SIZE).contains(&self.caption_font_size)
    }
}

impl Default for FrameStyle {
    fn default() -> Self {
        default_style()
    }
}

/// The initial style of every session.
pub const fn default_style() -> FrameStyle {
    FrameStyle {
        background_color: Color::WHITE,
        text_color: Color::rgb(0x0f, 0x17, 0x2a),
        font_size: 28,
        caption_font_size: 16,
        font_pairing: FontPairing::Serif,
        frame_design: FrameDesign::Classic3D,
    }
}

/// A single-field edit of a `FrameStyle`.
///
/// Sizes are taken as signed integers so programmatic callers can pass any
/// value; they are clamped when applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleField {
    BackgroundColor(Color),
    TextColor(Color),
    FontSize(i64),
    CaptionFontSize(i64),
    FontPairing(FontPairing),
    FrameDesign(FrameDesign),
}

fn clamp_size(v: i64, min: u32, max: u32) -> u32 {
    v.clamp(min as i64, max as i64) as u32
}

/// Return `style` with one field replaced. Sizes are clamped to their range.
pub fn set_field(style: FrameStyle, field: StyleField) -> FrameStyle {
    match field {
        StyleField::BackgroundColor(c) => FrameStyle { background_color: c, ..style },
        StyleField::TextColor(c) => FrameStyle { text_color: c, ..style },
        StyleField::FontSize(v) => FrameStyle {
            font_size: clamp_size(v, MIN_FONT_SIZE, MAX_FONT_SIZE),
            ..style
        },
        StyleField::CaptionFontSize(v) => FrameStyle {
            caption_font_size: clamp_size(v, MIN_CAPTION_FONT_SIZE, MAX_CAPTION_FONT_SIZE),
            ..style
        },
        StyleField::FontPairing(p) => FrameStyle { font_pairing: p, ..style },
        StyleField::FrameDesign(d) => FrameStyle { frame_design: d, ..style },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_values() {
        let s = default_style();
        assert_eq!(s.background_color.to_hex(), "#ffffff");
        assert_eq!(s.text_color.to_hex(), "#0f172a");
        assert_eq!(s.font_size, 28);
        assert_eq!(s.caption_font_size, 16);
        assert_eq!(s.font_pairing, FontPairing::Serif);
        assert_eq!(s.frame_design, FrameDesign::Classic3D);
        assert!(s.is_valid());
    }

    #[test]
    fn set_field_clamps_sizes() {
        let s = default_style();
        for v in [-100i64, 0, 11, 12, 40, 64, 65, 10_000] {
            let out = set_field(s, StyleField::FontSize(v));
            assert!((12..=64).contains(&out.font_size), "font size {} -> {}", v, out.font_size);
            let out = set_field(s, StyleField::CaptionFontSize(v));
            assert!((8..=32).contains(&out.caption_font_size));
            assert!(out.is_valid());
        }
        assert_eq!(set_field(s, StyleField::FontSize(3)).font_size, 12);
        assert_eq!(set_field(s, StyleField::FontSize(99)).font_size, 64);
        assert_eq!(set_field(s, StyleField::CaptionFontSize(20)).caption_font_size, 20);
    }

    #[test]
    fn set_field_touches_one_field() {
        let s = default_style();
        let out = set_field(s, StyleField::FrameDesign(FrameDesign::FloatingGlass));
        assert_eq!(out.frame_design, FrameDesign::FloatingGlass);
        assert_eq!(FrameStyle { frame_design: s.frame_design, ..out }, s);
    }

    #[test]
    fn color_parsing() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("A3E635").unwrap(), Color::rgb(0xa3, 0xe6, 0x35));
        assert_eq!(Color::from_hex("#00000080").unwrap().a, 0x80);
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn enum_names_parse() {
        assert_eq!("roman urdu".parse::<Language>().unwrap(), Language::RomanUrdu);
        assert_eq!("Sans-Serif".parse::<FontPairing>().unwrap(), FontPairing::SansSerif);
        assert_eq!("elegant-border".parse::<FrameDesign>().unwrap(), FrameDesign::ElegantBorder);
        assert!("Klingon".parse::<Language>().is_err());
        assert_eq!(FrameDesign::from_name_or_default("Neon Tube"), FrameDesign::Classic3D);
    }

    #[test]
    fn style_serde_uses_display_names() {
        let json = serde_json::to_string(&default_style()).unwrap();
        assert!(json.contains("\"backgroundColor\":\"#ffffff\""));
        assert!(json.contains("\"frameDesign\":\"Classic 3D\""));

        let mut v: serde_json::Value = serde_json::from_str(&json).unwrap();
        v["frameDesign"] = serde_json::Value::String("Holographic".into());
        let back: FrameStyle = serde_json::from_value(v).unwrap();
        assert_eq!(back.frame_design, FrameDesign::Classic3D);
    }
}

//! QuoteFrame
//!
//! Composes quote frames: a photo, a short quote (typed or generated), a
//! caption and a tunable style, resolved deterministically into one
//! render-ready composition and exported as PNG/JPEG or handed to a share
//! target.
//!
//! # Features
//!
//! - **gemini** (default): `GeminiGenerator`, a text-generation backend over the Gemini REST API
//! - **raster** (default): `SoftwareRasterizer`, a pure-Rust PNG/JPEG rasterizer
//!
//! # Example
//!
//! ```
//! use quoteframe::{compose, find_preset, Edit, Session};
//!
//! let session = Session::new()
//!     .apply(Edit::ApplyPreset(find_preset("Midnight").unwrap()))
//!     .apply(Edit::UseCustomQuote(true))
//!     .apply(Edit::CustomQuote("Be the light.".into()));
//!
//! let composition = compose(&session);
//! assert_eq!(composition.quote_text, "Be the light.");
//! ```

pub mod error;
pub use error::{Error, Operation, Result};

pub mod compose;
pub mod editor;
pub mod export;
pub mod generate;
pub mod platform;
pub mod presets;
pub mod rendering;
pub mod session;
pub mod style;
pub mod upload;

pub use compose::{compose, Composition, Direction};
pub use editor::{Editor, Services};
pub use export::{ExportFormat, ExportedFile, ShareOutcome};
pub use generate::{build_prompt, GenerationRequest, QuoteGenerator};
pub use presets::{apply_preset, find_preset, presets, StylePreset};
pub use rendering::Surface;
pub use session::{Edit, GenerationState, QuoteSource, Session};
pub use style::{default_style, set_field, Color, FontPairing, FrameDesign, FrameStyle, Language, StyleField};
pub use upload::ImageHandle;

#[cfg(feature = "gemini")]
pub use generate::GeminiGenerator;
#[cfg(feature = "raster")]
pub use rendering::raster::SoftwareRasterizer;

/// Runtime configuration
///
/// Defaults are conservative: no API key (generation is unavailable until one
/// is supplied), a 30 s request timeout and 2x rasterization.
///
/// # Examples
///
/// ```
/// let cfg = quoteframe::Config::default();
/// assert_eq!(cfg.pixel_ratio, 2);
/// assert!(cfg.api_key.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Generation backend API key
    pub api_key: Option<String>,
    /// Generation model name
    pub model: String,
    /// Generation backend base URL
    pub endpoint: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Logical frame size
    pub viewport: Viewport,
    /// Device pixels per logical pixel when rasterizing
    pub pixel_ratio: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout_ms: 30000,
            user_agent: concat!("quoteframe/", env!("CARGO_PKG_VERSION")).to_string(),
            viewport: Viewport::default(),
            pixel_ratio: 2,
            jpeg_quality: 95,
        }
    }
}

impl Config {
    /// Defaults overridden by `API_KEY` (or `GEMINI_API_KEY`),
    /// `QUOTEFRAME_MODEL` and `QUOTEFRAME_ENDPOINT`.
    pub fn from_env() -> Self {
        let var = |k: &str| std::env::var(k).ok().filter(|v| !v.trim().is_empty());
        let mut cfg = Config::default();
        cfg.api_key = var("API_KEY").or_else(|| var("GEMINI_API_KEY"));
        if let Some(m) = var("QUOTEFRAME_MODEL") {
            cfg.model = m;
        }
        if let Some(e) = var("QUOTEFRAME_ENDPOINT") {
            cfg.endpoint = e;
        }
        cfg
    }
}

/// Frame dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    /// Square frame plus the band above it that holds the image badge.
    fn default() -> Self {
        Self {
            width: 512,
            height: 512 + rendering::layout::TOP_BAND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.viewport.width, 512);
        assert_eq!(config.viewport.height, 568);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_raster_options_from_config() {
        let cfg = Config { pixel_ratio: 3, ..Default::default() };
        let opts = rendering::raster::RasterOptions::from(&cfg);
        assert_eq!(opts.pixel_ratio, 3);
        assert_eq!(opts.jpeg_quality, 95);
    }
}

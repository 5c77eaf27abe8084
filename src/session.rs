//! Explicit application state.
//!
//! A `Session` is an immutable snapshot: every user edit or completed external
//! call produces a new one via [`Session::apply`] and friends.

use crate::generate::GenerationRequest;
use crate::presets::{apply_preset, StylePreset};
use crate::style::{default_style, set_field, FrameStyle, Language, StyleField};
use crate::upload::ImageHandle;
use crate::Error;

/// Which quote slot is displayed. The inactive slot keeps its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteSource {
    pub use_custom: bool,
    pub generated_quote: String,
    pub custom_quote: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
    /// Last call failed; behaves like `Idle`
    Failed,
}

/// One user edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Topic(String),
    Language(Language),
    Style(StyleField),
    /// Replace the whole style
    SetStyle(FrameStyle),
    ApplyPreset(&'static StylePreset),
    Image(Option<ImageHandle>),
    Caption(String),
    UseCustomQuote(bool),
    CustomQuote(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub topic: String,
    pub language: Language,
    pub style: FrameStyle,
    pub image: Option<ImageHandle>,
    pub caption: String,
    pub source: QuoteSource,
    pub generation: GenerationState,
    /// The single visible, dismissible error message
    pub error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            topic: "Motivation".to_string(),
            language: Language::English,
            style: default_style(),
            image: None,
            caption: "Your Name".to_string(),
            source: QuoteSource::default(),
            generation: GenerationState::Idle,
            error: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, edit: Edit) -> Session {
        let mut next = self.clone();
        match edit {
            Edit::Topic(t) => next.topic = t,
            Edit::Language(l) => next.language = l,
            Edit::Style(field) => next.style = set_field(next.style, field),
            Edit::SetStyle(style) => {
                // Route sizes through the clamp so the range invariant holds.
                next.style = set_field(
                    set_field(style, StyleField::FontSize(style.font_size as i64)),
                    StyleField::CaptionFontSize(style.caption_font_size as i64),
                );
            }
            Edit::ApplyPreset(p) => next.style = apply_preset(p),
            Edit::Image(img) => next.image = img,
            Edit::Caption(c) => next.caption = c,
            Edit::UseCustomQuote(on) => next.source.use_custom = on,
            Edit::CustomQuote(q) => next.source.custom_quote = q,
            Edit::DismissError => next.error = None,
        }
        next
    }

    /// The quote for the active source (possibly empty).
    pub fn quote_text(&self) -> &str {
        crate::compose::resolve_quote_text(
            self.source.use_custom,
            &self.source.custom_quote,
            &self.source.generated_quote,
        )
    }

    pub fn is_generating(&self) -> bool {
        self.generation == GenerationState::Generating
    }

    /// Whether the generate control is enabled.
    pub fn can_generate(&self) -> bool {
        !self.source.use_custom && !self.is_generating() && !self.topic.trim().is_empty()
    }

    /// Start a generation call.
    ///
    /// Returns `Ok(None)` (no call, no change) while the custom source is
    /// active or a call is already pending. A blank topic is a
    /// `ValidationError`. On success the returned session is `Generating`
    /// with the error slot cleared.
    pub fn begin_generation(&self) -> crate::Result<Option<(Session, GenerationRequest)>> {
        if self.source.use_custom || self.is_generating() {
            return Ok(None);
        }
        let request = GenerationRequest::new(self.topic.clone(), self.language);
        request.validate()?;

        let mut next = self.clone();
        next.generation = GenerationState::Generating;
        next.error = None;
        Ok(Some((next, request)))
    }

    /// Record the outcome of a generation call. Always releases the pending
    /// state. Only the generated slot is written.
    pub fn finish_generation(&self, outcome: crate::Result<String>) -> Session {
        let mut next = self.clone();
        match outcome {
            Ok(text) => {
                next.source.generated_quote = text.trim().to_string();
                next.generation = GenerationState::Idle;
            }
            Err(err) => {
                next.generation = GenerationState::Failed;
                next.error = Some(err.to_string());
            }
        }
        next
    }

    /// Surface `err` in the error slot.
    pub fn report(&self, err: &Error) -> Session {
        let mut next = self.clone();
        next.error = Some(err.to_string());
        next
    }

    pub fn clear_error(&self) -> Session {
        self.apply(Edit::DismissError)
    }
}

//! Error types for quote frame composition and export

use std::fmt;
use thiserror::Error;

/// Result type alias for quoteframe operations
pub type Result<T> = std::result::Result<T, Error>;

/// The user action an export-side failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Download,
    Share,
}

impl Operation {
    /// Noun used in "could not capture frame for ..." messages
    pub fn purpose(&self) -> &'static str {
        match self {
            Operation::Download => "download",
            Operation::Share => "sharing",
        }
    }

    /// Past participle used in "the frame could not be ..." messages
    pub fn past(&self) -> &'static str {
        match self {
            Operation::Download => "downloaded",
            Operation::Share => "shared",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Download => f.write_str("download"),
            Operation::Share => f.write_str("share"),
        }
    }
}

/// Errors surfaced by user actions.
///
/// The `Display` text of every variant is the message shown to the user.
/// Variants that carry a cause keep it for logging only.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any external call was made
    #[error("{0}")]
    ValidationError(String),

    /// Generation backend failed (auth, network, quota, malformed reply)
    #[error("Failed to generate quote. Please check your API key and try again.")]
    ExternalServiceError(String),

    /// No renderable surface was available to capture
    #[error("Could not capture frame for {}.", .0.purpose())]
    CaptureError(Operation),

    /// Rasterization produced no usable blob to share
    #[error("Sorry, the frame could not be shared.")]
    EncodingError(String),

    /// The platform lacks a required capability
    #[error("{0}")]
    UnsupportedCapability(String),

    /// A rasterizer failed to paint or encode a surface
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Rasterization or hand-off failed
    #[error("Sorry, the frame could not be {}.", .0.past())]
    ExportError(Operation, String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Underlying cause intended for diagnostics, if any
    pub fn cause(&self) -> Option<&str> {
        match self {
            Error::ExternalServiceError(c) | Error::EncodingError(c) | Error::ExportError(_, c) => {
                Some(c.as_str())
            }
            _ => None,
        }
    }
}

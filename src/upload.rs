//! Uploaded image handling: bytes in, displayable `data:` URL out.
//!
//! No size or type validation is performed beyond what the caller's file
//! picker already applies.

use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// An in-memory, base64-embedded image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageHandle {
    mime: String,
    data_url: String,
}

impl ImageHandle {
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Self {
        Self {
            mime: mime.to_string(),
            data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    /// Read a file and embed it, guessing the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        log::debug!("loaded image {} ({} bytes, {})", path.display(), bytes.len(), mime);
        Ok(Self::from_bytes(&bytes, mime.essence_str()))
    }

    /// Wrap an existing `data:` URL.
    pub fn from_data_url(url: impl Into<String>) -> Result<Self> {
        let data_url = url.into();
        let mime = match data_url.strip_prefix("data:").and_then(|rest| rest.split_once(";base64,")) {
            Some((mime, _)) => mime.split(';').next().unwrap_or_default().to_string(),
            None => return Err(Error::ValidationError("Not a base64 data URL".into())),
        };
        Ok(Self { mime, data_url })
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decode the embedded payload back into raw bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        let payload = self
            .data_url
            .split_once(";base64,")
            .map(|(_, p)| p)
            .unwrap_or_default();
        STANDARD
            .decode(payload)
            .map_err(|e| Error::ValidationError(format!("Corrupt image data: {}", e)))
    }
}

// Data URLs are large; keep Debug output readable.
impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("mime", &self.mime())
            .field("len", &self.data_url.len())
            .finish()
    }
}

impl Serialize for ImageHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.data_url)
    }
}

//! Download and share of the captured frame.
//!
//! Both actions take the surface as an `Option`: a missing surface is a
//! capture failure reported before anything else is attempted. Every other
//! failure is normalized to one message per operation; the cause is logged.

use crate::error::Operation;
use crate::platform::{ShareData, ShareFailure, ShareTarget};
use crate::rendering::raster::{RasterFormat, RasterOptions, Rasterizer};
use crate::rendering::Surface;
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const SHARE_FILE_NAME: &str = "quote-frame.png";
pub const SHARE_TITLE: &str = "AI Generated Quote";
pub const SHARE_TEXT: &str = "Check out this quote frame I created!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    pub fn file_name(&self) -> String {
        format!("quote-frame.{}", self.extension())
    }

    fn raster_format(&self, options: &RasterOptions) -> RasterFormat {
        match self {
            ExportFormat::Png => RasterFormat::Png,
            ExportFormat::Jpeg => RasterFormat::Jpeg { quality: options.jpeg_quality },
        }
    }
}

/// An encoded frame ready to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Write into `dir` under the file's own name; returns the full path.
    pub fn save_in(&self, dir: impl AsRef<std::path::Path>) -> Result<std::path::PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Result of a share attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The user dismissed the share dialog; not an error
    Cancelled,
}

pub fn download(
    surface: Option<&Surface>,
    format: ExportFormat,
    rasterizer: &dyn Rasterizer,
    options: &RasterOptions,
) -> Result<ExportedFile> {
    let surface = surface.ok_or(Error::CaptureError(Operation::Download))?;
    let raster = format.raster_format(options);
    let bytes = rasterizer.rasterize(surface, options.pixel_ratio, raster).map_err(|e| {
        log::error!("Download failed: {}", e);
        Error::ExportError(Operation::Download, e.to_string())
    })?;
    Ok(ExportedFile {
        file_name: format.file_name(),
        mime: raster.mime(),
        bytes,
    })
}

/// Message for a platform without native sharing.
pub const SHARE_UNSUPPORTED: &str = "Native sharing is not supported on this platform.";

pub fn share(
    surface: Option<&Surface>,
    target: &dyn ShareTarget,
    rasterizer: &dyn Rasterizer,
    options: &RasterOptions,
) -> Result<ShareOutcome> {
    let surface = surface.ok_or(Error::CaptureError(Operation::Share))?;
    if !target.is_supported() {
        return Err(Error::UnsupportedCapability(SHARE_UNSUPPORTED.into()));
    }

    let bytes = rasterizer
        .rasterize(surface, options.pixel_ratio, RasterFormat::Png)
        .map_err(|e| {
            log::error!("Share failed: {}", e);
            Error::ExportError(Operation::Share, e.to_string())
        })?;
    if bytes.is_empty() {
        log::error!("Share failed: rasterizer produced no data");
        return Err(Error::EncodingError("empty image blob".into()));
    }

    let data = ShareData {
        title: SHARE_TITLE.to_string(),
        text: SHARE_TEXT.to_string(),
        file_name: SHARE_FILE_NAME.to_string(),
        mime: RasterFormat::Png.mime().to_string(),
        bytes,
    };
    if !target.can_share(&data) {
        log::error!("Share failed: platform refused the payload");
        return Err(Error::ExportError(
            Operation::Share,
            "This content cannot be shared on your device.".into(),
        ));
    }

    match target.share(data) {
        Ok(()) => Ok(ShareOutcome::Shared),
        Err(ShareFailure::Aborted) => {
            log::debug!("share dialog dismissed");
            Ok(ShareOutcome::Cancelled)
        }
        Err(ShareFailure::Failed(cause)) => {
            log::error!("Share failed: {}", cause);
            Err(Error::ExportError(Operation::Share, cause))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(ExportFormat::Png.file_name(), "quote-frame.png");
        assert_eq!(ExportFormat::Jpeg.file_name(), "quote-frame.jpeg");
    }

    #[test]
    fn data_url_encodes_bytes() {
        let f = ExportedFile { file_name: "a.png".into(), mime: "image/png", bytes: b"hi".to_vec() };
        assert_eq!(f.data_url(), "data:image/png;base64,aGk=");
    }
}

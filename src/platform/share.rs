//! Native share hand-off

use std::path::PathBuf;

/// A file to share plus its accompanying text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Why a share attempt did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareFailure {
    /// The user dismissed the share dialog
    Aborted,
    Failed(String),
}

pub trait ShareTarget: Send + Sync {
    /// Whether the platform offers native sharing at all.
    fn is_supported(&self) -> bool;

    /// Whether this particular payload can be shared.
    fn can_share(&self, _data: &ShareData) -> bool {
        self.is_supported()
    }

    fn share(&self, data: ShareData) -> Result<(), ShareFailure>;
}

/// Platform without native sharing.
#[derive(Debug, Default)]
pub struct NoopShare;

impl NoopShare {
    pub fn new() -> Self {
        NoopShare
    }
}

impl ShareTarget for NoopShare {
    fn is_supported(&self) -> bool {
        false
    }

    fn share(&self, _data: ShareData) -> Result<(), ShareFailure> {
        Err(ShareFailure::Failed("sharing is not supported".into()))
    }
}

/// Shares by dropping the file into a directory (e.g. a synced folder).
#[derive(Debug, Clone)]
pub struct DirectoryShare {
    dir: PathBuf,
}

impl DirectoryShare {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl ShareTarget for DirectoryShare {
    fn is_supported(&self) -> bool {
        true
    }

    fn share(&self, data: ShareData) -> Result<(), ShareFailure> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ShareFailure::Failed(e.to_string()))?;
        let path = self.dir.join(&data.file_name);
        std::fs::write(&path, &data.bytes).map_err(|e| ShareFailure::Failed(e.to_string()))?;
        log::info!("shared {} ({}) to {}", data.title, data.mime, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ShareData {
        ShareData {
            title: "t".into(),
            text: "x".into(),
            file_name: "quote-frame.png".into(),
            mime: "image/png".into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn noop_share_is_unsupported() {
        let s = NoopShare::new();
        assert!(!s.is_supported());
        assert!(!s.can_share(&sample()));
    }

    #[test]
    fn directory_share_writes_file() {
        let dir = std::env::temp_dir().join(format!("quoteframe-share-{}", std::process::id()));
        let s = DirectoryShare::new(&dir);
        assert!(s.can_share(&sample()));
        s.share(sample()).expect("share should succeed");
        assert_eq!(std::fs::read(dir.join("quote-frame.png")).unwrap(), vec![1, 2, 3]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}

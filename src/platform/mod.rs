//! Platform capabilities used by export: native sharing.
//!
//! Hosts plug their platform in through [`ShareTarget`]. [`NoopShare`] is the
//! safe default for platforms without a share sheet.

pub mod share;

pub use share::{DirectoryShare, NoopShare, ShareData, ShareFailure, ShareTarget};

//! Materializing a project on disk
//!
//! This module provides:
//! - Archive download and root-stripping extraction
//! - Platform file swaps and composer.json edits
//! - Interactive `.env` collection

pub mod archive;
pub mod collector;
pub mod downloader;
pub mod env_file;
pub mod language;
pub mod manifest;
pub mod platform;

pub use collector::ConfigurationCollector;
pub use downloader::{DownloadOutcome, DownloadRequest, ProjectDownloader, LATEST};
pub use env_file::ProjectConfiguration;
pub use language::Language;
pub use platform::PlatformPatchSet;

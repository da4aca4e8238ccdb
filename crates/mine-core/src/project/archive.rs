//! Zip extraction with root-folder stripping
//!
//! Source archives exported by the hosting provider wrap everything in one
//! synthetic folder (`mineadmin-3.1.0/...`). Extraction drops that first path
//! segment so the project lands directly in the destination directory.

use crate::error::{MineError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

/// Extract `archive_path` into `destination`, returning how many files were written
///
/// Directory entries and files sitting directly in the archive root are
/// skipped. The first I/O failure aborts extraction; files written before it
/// are left in place.
pub fn extract(archive_path: &Path, destination: &Path) -> Result<usize> {
    let archive_error = |source: zip::result::ZipError| MineError::Archive {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| archive_error(e.into()))?;
    let mut archive = ZipArchive::new(file).map_err(archive_error)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_error)?;

        if entry.is_dir() {
            continue;
        }

        let Some(relative) = strip_root(entry.name()) else {
            continue;
        };

        let target = destination.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MineError::io(format!("failed to create directory {}", parent.display()), e)
            })?;
        }

        let mut out = File::create(&target)
            .map_err(|e| MineError::io(format!("failed to create {}", target.display()), e))?;
        io::copy(&mut entry, &mut out).map_err(|e| match e.kind() {
            // Decompression and CRC failures surface as InvalidData from the entry reader
            io::ErrorKind::InvalidData => archive_error(e.into()),
            _ => MineError::io(format!("failed to write {}", target.display()), e),
        })?;

        written += 1;
    }

    tracing::debug!(files = written, "extracted {}", archive_path.display());
    Ok(written)
}

/// Destination-relative path for an entry, or `None` if it should be skipped
///
/// Zip entry names always use `/`. Entries with a single segment live in the
/// synthetic root and are dropped; names that would escape the destination
/// are dropped with a warning.
fn strip_root(name: &str) -> Option<PathBuf> {
    let segments: Vec<&str> = name.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return None;
    }

    let relative: PathBuf = segments[1..].iter().collect();
    let escapes = name.starts_with('/')
        || relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        tracing::warn!("skipping archive entry outside the project root: {}", name);
        return None;
    }

    Some(relative)
}

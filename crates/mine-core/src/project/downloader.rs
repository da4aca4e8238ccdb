//! Archive download and extraction into the project directory

use super::archive;
use super::language::Language;
use crate::console::{Console, Level};
use crate::error::{MineError, Result};
use crate::remote::RemoteFetcher;
use std::path::PathBuf;
use tokio::fs;
use url::Url;

/// Version sentinel that must be resolved before anything is downloaded
pub const LATEST: &str = "latest";

/// What to download and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub language: Language,
    /// Concrete release tag, e.g. `v3.1.0`
    pub version: String,
    /// Runtime variant, e.g. `swow` or `swoole`
    pub platform: String,
    pub project_dir: PathBuf,
}

impl DownloadRequest {
    /// Archive URL under `base`
    ///
    /// PHP uses the tagged source archive (`{base}/{version}.zip`); the other
    /// editions publish per-platform builds (`{base}/{version}/mineadmin-{lang}-{platform}.zip`).
    pub fn archive_url(&self, base: &Url) -> Result<Url> {
        if self.version == LATEST || self.version.is_empty() {
            return Err(MineError::Input(format!(
                "version '{}' must be resolved to a release tag before downloading",
                self.version
            )));
        }

        let file_name = self.archive_file_name();
        if self.language.is_primary() {
            RemoteFetcher::build_url(base, [file_name.as_str()])
        } else {
            RemoteFetcher::build_url(base, [self.version.as_str(), file_name.as_str()])
        }
    }

    /// File name the downloaded archive is kept under inside the project directory
    pub fn archive_file_name(&self) -> String {
        if self.language.is_primary() {
            format!("{}.zip", self.version)
        } else {
            format!("mineadmin-{}-{}.zip", self.language.id(), self.platform)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Retained copy of the downloaded archive
    pub archive_path: PathBuf,
    pub extracted_files: usize,
}

pub struct ProjectDownloader<'a> {
    fetcher: &'a RemoteFetcher,
    archive_base: &'a Url,
}

impl<'a> ProjectDownloader<'a> {
    pub fn new(fetcher: &'a RemoteFetcher, archive_base: &'a Url) -> Self {
        Self {
            fetcher,
            archive_base,
        }
    }

    /// Create the project directory, download the archive into it and extract it
    ///
    /// Steps run in order and the first failure is returned as-is; nothing
    /// created before the failure is removed.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        console: &dyn Console,
    ) -> Result<DownloadOutcome> {
        let url = request.archive_url(self.archive_base)?;
        let project_dir = &request.project_dir;

        console.notify(Level::Info, "Creating project directory...");
        let progress = console.show_progress("Setting up project structure");
        fs::create_dir_all(project_dir).await.map_err(|e| {
            MineError::io(
                format!("failed to create project directory {}", project_dir.display()),
                e,
            )
        })?;
        progress.stop(&format!("Project directory: {}", project_dir.display()));

        console.notify(Level::Info, "Downloading project files...");
        let progress = console.show_progress("Fetching MineAdmin source code");
        let bytes = self.fetcher.fetch_archive(&url).await?;
        let archive_path = project_dir.join(request.archive_file_name());
        fs::write(&archive_path, &bytes)
            .await
            .map_err(|e| MineError::io(format!("failed to write {}", archive_path.display()), e))?;
        progress.stop(&format!(
            "Downloaded {} ({} bytes)",
            request.archive_file_name(),
            bytes.len()
        ));
        console.notify(Level::Success, "Download completed");

        console.notify(Level::Info, "Extracting project files...");
        let progress = console.show_progress("Unpacking MineAdmin source code");
        let extracted_files = archive::extract(&archive_path, project_dir)?;
        progress.stop(&format!("Extracted {} files", extracted_files));
        console.notify(Level::Success, "Extraction completed");

        Ok(DownloadOutcome {
            archive_path,
            extracted_files,
        })
    }
}

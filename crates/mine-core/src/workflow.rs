//! Project creation, start to finish
//!
//! Stages run strictly in order:
//!
//! 1. resolve `latest` to a concrete release tag
//! 2. download and extract the archive
//! 3. swap in platform files (PHP + swow + newer than v3.0.0 only)
//! 4. collect configuration and write `.env` (PHP only)
//!
//! The first failure stops the run and is reported with the stage it happened in.

use crate::config::MineConfig;
use crate::console::{Console, Level};
use crate::error::{MineError, Result};
use crate::project::{
    platform, ConfigurationCollector, DownloadOutcome, DownloadRequest, Language,
    PlatformPatchSet, ProjectDownloader, LATEST,
};
use crate::remote::{RemoteFetcher, VersionQuery};
use crate::version;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What the user asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub project_dir: PathBuf,
    pub language: Language,
    /// Release tag or [`LATEST`]
    pub version: String,
    pub platform: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingVersion,
    Downloading,
    PatchingPlatformFiles,
    CollectingConfiguration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolvingVersion => "Resolving version",
            Stage::Downloading => "Downloading",
            Stage::PatchingPlatformFiles => "Patching platform files",
            Stage::CollectingConfiguration => "Collecting configuration",
        };
        f.write_str(name)
    }
}

/// A failed run: the stage that failed and why
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: MineError,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationReport {
    pub project_dir: PathBuf,
    pub language: Language,
    /// Resolved release tag
    pub version: String,
    pub platform: String,
    pub download: DownloadOutcome,
    /// Platform files written, empty when no patch applied
    pub patched_files: Vec<PathBuf>,
    /// `.env` location, `None` for editions that don't collect configuration
    pub env_file: Option<PathBuf>,
}

pub struct ProjectCreationWorkflow<'a> {
    config: &'a MineConfig,
    console: &'a dyn Console,
    fetcher: RemoteFetcher,
    patch_set: PlatformPatchSet,
}

impl<'a> ProjectCreationWorkflow<'a> {
    pub fn new(config: &'a MineConfig, console: &'a dyn Console) -> Result<Self> {
        Ok(Self {
            config,
            console,
            fetcher: RemoteFetcher::new(config)?,
            patch_set: platform::SWOW,
        })
    }

    pub async fn run(&self, options: CreateOptions) -> Result<CreationReport, StageError> {
        let at = |stage: Stage| move |source: MineError| StageError { stage, source };

        tracing::debug!(stage = %Stage::ResolvingVersion, "starting");
        let version = self
            .resolve_version(options.language, &options.version)
            .await
            .map_err(at(Stage::ResolvingVersion))?;

        let request = DownloadRequest {
            language: options.language,
            version,
            platform: options.platform,
            project_dir: options.project_dir,
        };
        self.console.notify(
            Level::Info,
            &format!(
                "Language: {}, Version: {}, Platform: {}",
                request.language, request.version, request.platform
            ),
        );

        tracing::debug!(stage = %Stage::Downloading, "starting");
        self.confirm_target(&request)
            .map_err(at(Stage::Downloading))?;
        let download = ProjectDownloader::new(&self.fetcher, &self.config.archive_base)
            .download(&request, self.console)
            .await
            .map_err(at(Stage::Downloading))?;

        let mut patched_files = Vec::new();
        if self
            .patch_set
            .applies_to(request.language, &request.platform, &request.version)
        {
            tracing::debug!(stage = %Stage::PatchingPlatformFiles, "starting");
            patched_files = self
                .patch_set
                .apply(
                    &self.fetcher,
                    &self.config.repository,
                    &request.version,
                    &request.project_dir,
                    self.console,
                )
                .await
                .map_err(at(Stage::PatchingPlatformFiles))?;
        }

        let mut env_file = None;
        if request.language.is_primary() {
            tracing::debug!(stage = %Stage::CollectingConfiguration, "starting");
            env_file = Some(
                ConfigurationCollector::new()
                    .collect(self.console, &request.project_dir)
                    .map_err(at(Stage::CollectingConfiguration))?,
            );
        }

        Ok(CreationReport {
            project_dir: request.project_dir,
            language: request.language,
            version: request.version,
            platform: request.platform,
            download,
            patched_files,
            env_file,
        })
    }

    /// Turn `latest` into a concrete tag; anything else passes through
    ///
    /// PHP asks the user to pick from the live release list. The other
    /// editions have a fixed catalog, so the newest entry is taken directly.
    async fn resolve_version(&self, language: Language, requested: &str) -> Result<String> {
        if requested != LATEST {
            return Ok(requested.to_string());
        }

        let query = VersionQuery::for_language(language, &self.fetcher, &self.config.repository);

        if !language.is_primary() {
            let versions = query.list_versions().await?;
            let newest = version::newest(&versions).ok_or_else(|| no_releases(language))?;
            self.console.notify(
                Level::Info,
                &format!("Using latest {} version {}", language.display_name(), newest),
            );
            return Ok(newest.to_string());
        }

        let progress = self.console.show_progress("Fetching available MineAdmin versions");
        let versions = query.list_versions().await?;
        progress.stop(&format!("Found {} versions", versions.len()));

        if versions.is_empty() {
            return Err(no_releases(language));
        }

        let index = self
            .console
            .ask_choice("Select a MineAdmin version", &versions)?;
        let chosen = versions
            .into_iter()
            .nth(index)
            .ok_or_else(|| MineError::Input(format!("no version at position {}", index + 1)))?;
        Ok(chosen)
    }

    /// Ask before extracting over a directory that already has files in it
    fn confirm_target(&self, request: &DownloadRequest) -> Result<()> {
        let existing = match std::fs::read_dir(&request.project_dir) {
            Ok(entries) => entries.count(),
            Err(_) => return Ok(()),
        };
        if existing == 0 {
            return Ok(());
        }

        self.console.notify(
            Level::Warning,
            &format!(
                "{} already has {} existing items",
                request.project_dir.display(),
                existing
            ),
        );
        if self.console.confirm("Continue anyway?", true)? {
            Ok(())
        } else {
            Err(MineError::Input("setup cancelled".to_string()))
        }
    }
}

fn no_releases(language: Language) -> MineError {
    MineError::Schema {
        document: format!("{} release list", language.display_name()),
        message: "no releases published".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Answer, ScriptedConsole};

    #[test]
    fn test_stage_error_message() {
        let err = StageError {
            stage: Stage::PatchingPlatformFiles,
            source: MineError::Remote {
                url: "https://raw.githubusercontent.com/x".to_string(),
                status: 404,
            },
        };
        assert_eq!(
            err.to_string(),
            "Patching platform files failed: https://raw.githubusercontent.com/x responded with HTTP 404"
        );
    }

    #[tokio::test]
    async fn test_concrete_version_passes_through() {
        let config = MineConfig::github().unwrap();
        let console = ScriptedConsole::new();
        let workflow = ProjectCreationWorkflow::new(&config, &console).unwrap();

        for language in Language::ALL {
            let version = workflow.resolve_version(language, "v3.1.0").await.unwrap();
            assert_eq!(version, "v3.1.0");
        }
        assert!(console.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_latest_for_alternate_language_uses_catalog() {
        let config = MineConfig::github().unwrap();
        let console = ScriptedConsole::new();
        let workflow = ProjectCreationWorkflow::new(&config, &console).unwrap();

        let version = workflow.resolve_version(Language::Go, LATEST).await.unwrap();
        assert_eq!(version, "v1.1.0");
    }

    #[test]
    fn test_declining_existing_directory_cancels() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("README.md"), "hello").unwrap();

        let config = MineConfig::github().unwrap();
        let console = ScriptedConsole::with_answers([Answer::Confirm(false)]);
        let workflow = ProjectCreationWorkflow::new(&config, &console).unwrap();
        let request = DownloadRequest {
            language: Language::Php,
            version: "v3.1.0".to_string(),
            platform: "swow".to_string(),
            project_dir: tmp.path().to_path_buf(),
        };

        assert!(matches!(
            workflow.confirm_target(&request),
            Err(MineError::Input(_))
        ));
    }

    #[test]
    fn test_missing_directory_needs_no_confirmation() {
        let tmp = tempfile::tempdir().unwrap();
        let config = MineConfig::github().unwrap();
        let console = ScriptedConsole::with_answers([Answer::Confirm(false)]);
        let workflow = ProjectCreationWorkflow::new(&config, &console).unwrap();
        let request = DownloadRequest {
            language: Language::Php,
            version: "v3.1.0".to_string(),
            platform: "swow".to_string(),
            project_dir: tmp.path().join("demo"),
        };

        assert!(workflow.confirm_target(&request).is_ok());
    }
}

//! Platform-specific file swaps applied after extraction

use super::language::Language;
use super::manifest;
use crate::console::{Console, Level};
use crate::error::{MineError, Result};
use crate::remote::RemoteFetcher;
use crate::version;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files and dependency swap that turn a Swoole checkout into a Swow one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPatchSet {
    /// Platform variant that triggers the patch
    pub platform: &'static str,
    /// Releases strictly newer than this need the patch
    pub threshold: &'static str,
    /// `(path in upstream repository, path in project)` pairs, applied in order
    pub files: &'static [(&'static str, &'static str)],
    pub manifest: &'static str,
    pub remove_dependency: &'static str,
    pub add_dependency: (&'static str, &'static str),
}

/// Swow runtime variant of MineAdmin 3.x
pub const SWOW: PlatformPatchSet = PlatformPatchSet {
    platform: "swow",
    threshold: "v3.0.0",
    files: &[
        (".github/ci/swow/Dockerfile", "Dockerfile"),
        (".github/ci/swow/bin/hyperf.php", "bin/hyperf.php"),
        (
            ".github/ci/swow/config/autoload/server.php",
            "config/autoload/server.php",
        ),
    ],
    manifest: "composer.json",
    remove_dependency: "ext-swoole",
    add_dependency: ("hyperf/engine-swow", "*"),
};

impl PlatformPatchSet {
    /// Whether a project of `language`/`platform`/`version` needs this patch
    pub fn applies_to(&self, language: Language, platform: &str, version: &str) -> bool {
        language.is_primary()
            && platform.eq_ignore_ascii_case(self.platform)
            && version::is_newer_than(version, self.threshold)
    }

    /// Overwrite the project's files with their platform variants fetched at
    /// `version`, then swap the manifest dependency
    ///
    /// Returns the destination paths that were written, in patch order.
    pub async fn apply(
        &self,
        fetcher: &RemoteFetcher,
        repository: &str,
        version: &str,
        project_dir: &Path,
        console: &dyn Console,
    ) -> Result<Vec<PathBuf>> {
        console.notify(
            Level::Info,
            &format!("Applying {} platform files...", self.platform),
        );

        let mut written = Vec::with_capacity(self.files.len());
        for (source, destination) in self.files {
            let progress = console.show_progress(&format!("Fetching {}", source));
            let content = fetcher
                .fetch_file_content(repository, version, source)
                .await?;

            let target = project_dir.join(destination);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    MineError::io(format!("failed to create directory {}", parent.display()), e)
                })?;
            }
            fs::write(&target, &content)
                .await
                .map_err(|e| MineError::io(format!("failed to write {}", target.display()), e))?;
            progress.stop(&format!("Replaced {}", destination));

            written.push(target);
        }

        let (add_key, add_value) = self.add_dependency;
        manifest::remove_and_add_dependency(
            &project_dir.join(self.manifest),
            self.remove_dependency,
            add_key,
            add_value,
        )?;
        console.notify(
            Level::Success,
            &format!(
                "{}: replaced {} with {}",
                self.manifest, self.remove_dependency, add_key
            ),
        );

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_to_swow_after_threshold() {
        assert!(SWOW.applies_to(Language::Php, "swow", "v3.1.0"));
        assert!(SWOW.applies_to(Language::Php, "SWOW", "3.0.1"));
    }

    #[test]
    fn test_threshold_itself_is_not_patched() {
        assert!(!SWOW.applies_to(Language::Php, "swow", "v3.0.0"));
        assert!(!SWOW.applies_to(Language::Php, "swow", "v3.0"));
        assert!(!SWOW.applies_to(Language::Php, "swow", "v2.9.9"));
    }

    #[test]
    fn test_other_platforms_are_never_patched() {
        assert!(!SWOW.applies_to(Language::Php, "swoole", "v9.0.0"));
        assert!(!SWOW.applies_to(Language::Php, "", "v9.0.0"));
    }

    #[test]
    fn test_alternate_languages_are_never_patched() {
        assert!(!SWOW.applies_to(Language::Go, "swow", "v9.0.0"));
        assert!(!SWOW.applies_to(Language::Js, "swow", "v9.0.0"));
    }

    #[test]
    fn test_three_files_in_order() {
        let destinations: Vec<_> = SWOW.files.iter().map(|(_, d)| *d).collect();
        assert_eq!(
            destinations,
            vec!["Dockerfile", "bin/hyperf.php", "config/autoload/server.php"]
        );
    }
}

//! Where the list of available versions comes from, per language

use super::fetcher::RemoteFetcher;
use crate::error::Result;
use crate::project::Language;

/// Versions published for the Go and JS editions
const CATALOG_VERSIONS: &[&str] = &["v1.0.0", "v1.0.1", "v1.1.0"];

/// Version listing strategy
///
/// PHP releases are listed live from the hosting provider; the other editions
/// ship from a fixed catalog.
pub enum VersionQuery<'a> {
    Releases {
        fetcher: &'a RemoteFetcher,
        repository: &'a str,
    },
    Catalog(&'static [&'static str]),
}

impl<'a> VersionQuery<'a> {
    pub fn for_language(
        language: Language,
        fetcher: &'a RemoteFetcher,
        repository: &'a str,
    ) -> Self {
        if language.is_primary() {
            VersionQuery::Releases {
                fetcher,
                repository,
            }
        } else {
            VersionQuery::Catalog(CATALOG_VERSIONS)
        }
    }

    pub async fn list_versions(&self) -> Result<Vec<String>> {
        match self {
            VersionQuery::Releases {
                fetcher,
                repository,
            } => fetcher.list_releases(repository).await,
            VersionQuery::Catalog(versions) => {
                Ok(versions.iter().map(|v| v.to_string()).collect())
            }
        }
    }
}

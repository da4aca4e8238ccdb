//! HTTP access to the hosting provider
//!
//! Three kinds of request, all through one client:
//! - the releases listing (JSON array of release objects)
//! - raw file content addressed by repository, ref and path
//! - tagged source archives

use crate::config::MineConfig;
use crate::error::{MineError, Result};
use bytes::Bytes;
use serde::Deserialize;
use url::Url;

/// Subset of a GitHub release object we care about
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

pub struct RemoteFetcher {
    client: reqwest::Client,
    api_base: Url,
    raw_base: Url,
}

impl RemoteFetcher {
    pub fn new(config: &MineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| MineError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            raw_base: config.raw_base.clone(),
        })
    }

    /// Build a URL by appending path segments, preserving query parameters
    pub(crate) fn build_url<'a, I>(base: &Url, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| MineError::Config(format!("URL cannot have path segments: {}", base)))?
            .pop_if_empty()
            .extend(segments.into_iter().filter(|s| !s.is_empty()));
        Ok(url)
    }

    /// List release tags of `repository`, in the order the provider returns them
    pub async fn list_releases(&self, repository: &str) -> Result<Vec<String>> {
        let url = Self::build_url(
            &self.api_base,
            std::iter::once("repos")
                .chain(repository.split('/'))
                .chain(std::iter::once("releases")),
        )?;

        let body = self
            .get(&url, &[("Accept", "application/vnd.github+json")])
            .await?;
        let releases: Vec<Release> =
            serde_json::from_slice(&body).map_err(|source| MineError::Decode {
                what: format!("release list from {}", url),
                source,
            })?;

        tracing::debug!(count = releases.len(), "listed releases of {}", repository);
        Ok(releases.into_iter().map(|r| r.tag_name).collect())
    }

    /// Fetch one file of `repository` at `git_ref` from the raw content endpoint
    pub async fn fetch_file_content(
        &self,
        repository: &str,
        git_ref: &str,
        path: &str,
    ) -> Result<Bytes> {
        let url = Self::build_url(
            &self.raw_base,
            repository
                .split('/')
                .chain(std::iter::once(git_ref))
                .chain(path.split('/')),
        )?;
        self.get(&url, &[]).await
    }

    /// Download an archive in full
    pub async fn fetch_archive(&self, url: &Url) -> Result<Bytes> {
        self.get(url, &[]).await
    }

    async fn get(&self, url: &Url, headers: &[(&str, &str)]) -> Result<Bytes> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|source| MineError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(MineError::Remote {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| MineError::Network {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(bytes = bytes.len(), "fetched {}", url);
        Ok(bytes)
    }
}

//! Endpoint and client configuration
//!
//! Everything the workflow needs to know about the outside world lives in
//! [`MineConfig`], built once by the binary and passed down explicitly.

use crate::error::{MineError, Result};
use std::time::Duration;
use url::Url;

/// Upstream repository that publishes the MineAdmin releases
pub const DEFAULT_REPOSITORY: &str = "mineadmin/mineadmin";

const DEFAULT_ARCHIVE_URL: &str = "https://github.com/mineadmin/mineadmin/archive/refs/tags";
const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variables that override the defaults
pub const ARCHIVE_URL_ENV: &str = "MINE_ARCHIVE_URL";
pub const API_URL_ENV: &str = "MINE_API_URL";
pub const RAW_URL_ENV: &str = "MINE_RAW_URL";
pub const TIMEOUT_ENV: &str = "MINE_HTTP_TIMEOUT";

#[derive(Debug, Clone)]
pub struct MineConfig {
    /// `owner/name` of the repository releases are listed from
    pub repository: String,
    /// Base for tagged archive downloads
    pub archive_base: Url,
    /// Base of the hosting provider's REST API
    pub api_base: Url,
    /// Base of the raw file content endpoint
    pub raw_base: Url,
    pub user_agent: String,
    /// Applies to every HTTP request
    pub timeout: Duration,
}

impl MineConfig {
    /// Defaults pointing at GitHub
    pub fn github() -> Result<Self> {
        Ok(Self {
            repository: DEFAULT_REPOSITORY.to_string(),
            archive_base: parse_url(DEFAULT_ARCHIVE_URL)?,
            api_base: parse_url(DEFAULT_API_URL)?,
            raw_base: parse_url(DEFAULT_RAW_URL)?,
            user_agent: concat!("mine/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// GitHub defaults with any `MINE_*` overrides from the environment applied
    pub fn from_env() -> Result<Self> {
        Self::github()?.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(ARCHIVE_URL_ENV) {
            self.archive_base = parse_url(&value)?;
        }
        if let Some(value) = lookup(API_URL_ENV) {
            self.api_base = parse_url(&value)?;
        }
        if let Some(value) = lookup(RAW_URL_ENV) {
            self.raw_base = parse_url(&value)?;
        }
        if let Some(value) = lookup(TIMEOUT_ENV) {
            let secs: u64 = value.trim().parse().map_err(|_| {
                MineError::Config(format!(
                    "{} must be a number of seconds, got '{}'",
                    TIMEOUT_ENV, value
                ))
            })?;
            if secs == 0 {
                return Err(MineError::Config(format!("{} must be greater than 0", TIMEOUT_ENV)));
            }
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Point every endpoint at one base URL (used against mock servers)
    pub fn with_base(base: &str) -> Result<Self> {
        let base = base.trim_end_matches('/');
        Ok(Self {
            archive_base: parse_url(&format!("{}/archive", base))?,
            api_base: parse_url(base)?,
            raw_base: parse_url(&format!("{}/raw", base))?,
            ..Self::github()?
        })
    }
}

fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| MineError::Config(format!("invalid URL '{}': {}", value, e)))
}

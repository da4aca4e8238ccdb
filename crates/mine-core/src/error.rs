//! Error taxonomy shared by every stage of project creation

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = MineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MineError {
    /// The remote endpoint could not be reached (DNS, TLS, connect, timeout)
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered, but not with 200 OK
    #[error("{url} responded with HTTP {status}{}", rate_limit_hint(.status))]
    Remote { url: String, status: u16 },

    /// A response or file body was not the JSON we expected
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A parsed document is missing the structure we need to edit
    #[error("{document}: {message}")]
    Schema { document: String, message: String },

    #[error("invalid input: {0}")]
    Input(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MineError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        MineError::Io {
            context: context.into(),
            source,
        }
    }

    /// True when the hosting provider refused the request because of rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, MineError::Remote { status: 403 | 429, .. })
    }
}

fn rate_limit_hint(status: &u16) -> &'static str {
    match *status {
        403 | 429 => " (rate limited, try again later)",
        _ => "",
    }
}

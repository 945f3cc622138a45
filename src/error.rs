//! Error types for the news desk.
//!
//! Two families:
//!
//! - [`DeskError`]: failures the caller must see. Only configuration problems
//!   ever stop a search from starting; the I/O and serialization variants are
//!   produced by the archive and config layers and are logged and swallowed by
//!   [`crate::pipeline::run_aggregation`].
//! - [`FetchError`]: a single source failing to deliver a feed. These never
//!   cross the orchestrator boundary as errors; they are carried inside a
//!   [`crate::feeds::fetch::FetchOutcome`] and rendered as "no related news".

use thiserror::Error;

/// Errors surfaced by configuration, archive and output handling.
#[derive(Debug, Error)]
pub enum DeskError {
    /// The request or the runtime settings are unusable (e.g. `custom` mode
    /// without a keyword, zero concurrency).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DeskError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        DeskError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a single source produced no entries in this run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend answered HTTP {0}")]
    Status(u16),

    #[error("malformed feed: {0}")]
    Parse(#[from] quick_xml::de::DeError),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

//! Runtime settings for the news desk.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults ([`DeskConfig::default`])
//! 2. An optional YAML file (`--config` / `THAI_NEWS_DESK_CONFIG`)
//! 3. Individual CLI flags, applied by the binary after loading
//!
//! # Example file
//!
//! ```yaml
//! archive_path: ./data/news_data.json
//! max_archive_size: 1000
//! concurrency: 5
//! fetch_timeout_secs: 15
//! report_dir: ./reports
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::DeskError;

/// Default archive location, relative to the working directory.
pub const DEFAULT_ARCHIVE_PATH: &str = "news_data.json";
/// Maximum number of items retained in the archive.
pub const DEFAULT_MAX_ARCHIVE_SIZE: usize = 1000;
/// Concurrent feed fetches per request.
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
/// Google News rejects some default client identifiers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings shared by every request in one process.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeskConfig {
    /// Backing JSON file of the archive.
    pub archive_path: PathBuf,
    /// Retention bound of the archive; oldest items beyond it are dropped.
    pub max_archive_size: usize,
    /// Worker pool size for feed fetching.
    pub concurrency: usize,
    /// Per-fetch timeout in seconds.
    pub fetch_timeout_secs: u64,
    /// Client identification header sent to the backend.
    pub user_agent: String,
    /// When set, each report is also written to `<report_dir>/<date>_<mode>.txt`.
    pub report_dir: Option<PathBuf>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from(DEFAULT_ARCHIVE_PATH),
            max_archive_size: DEFAULT_MAX_ARCHIVE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            report_dir: None,
        }
    }
}

impl DeskConfig {
    /// Load settings from an optional YAML file, falling back to defaults.
    ///
    /// # Errors
    ///
    /// - [`DeskError::Config`] if the file cannot be read
    /// - [`DeskError::Yaml`] if it is not valid YAML for [`DeskConfig`]
    /// - [`DeskError::InvalidConfig`] if a value is out of range
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, DeskError> {
        let config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| DeskError::Config {
                        path: path.display().to_string(),
                        source,
                    })?;
                Self::from_yaml(&content)?
            }
            None => Self::default(),
        };
        config.validate()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Parse settings from YAML text. Missing keys take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, DeskError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reject values the rest of the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), DeskError> {
        if self.concurrency == 0 {
            return Err(DeskError::InvalidConfig("concurrency must be at least 1".into()));
        }
        if self.max_archive_size == 0 {
            return Err(DeskError::InvalidConfig(
                "max_archive_size must be at least 1".into(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(DeskError::InvalidConfig(
                "fetch_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

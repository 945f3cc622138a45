//! Feed fetching with failures captured as values.
//!
//! The [`FeedFetcher`] trait is the seam between the orchestrator and the
//! network: [`HttpFeedFetcher`] talks to the real backend, tests substitute a
//! stub. [`fetch_outcome`] wraps any fetcher so that network errors, malformed
//! bodies and timeouts all come back as a [`FetchOutcome`] tagged with the
//! offending source instead of propagating.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::DeskConfig;
use crate::error::FetchError;
use crate::feeds::parse::parse_feed;
use crate::models::{FeedEntry, SourceDescriptor};

/// Retrieves and parses one source's feed.
///
/// A successful empty `Vec` means the backend had nothing for this query,
/// which is distinct from an `Err`.
pub trait FeedFetcher {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<Vec<FeedEntry>, FetchError>;
}

/// The result of fetching one source, successful or not.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Position of the source in build order.
    pub index: usize,
    pub source: SourceDescriptor,
    pub result: Result<Vec<FeedEntry>, FetchError>,
}

impl FetchOutcome {
    /// Entries delivered by this source; empty for failures.
    pub fn entries(&self) -> &[FeedEntry] {
        match &self.result {
            Ok(entries) => entries,
            Err(_) => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    /// Build a client that identifies as a desktop browser and enforces a
    /// per-request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &DeskConfig) -> Result<Self, FetchError> {
        Self::new(&config.user_agent, config.fetch_timeout())
    }
}

impl FeedFetcher for HttpFeedFetcher {
    #[instrument(level = "info", skip_all, fields(source = %source.name))]
    async fn fetch(&self, source: &SourceDescriptor) -> Result<Vec<FeedEntry>, FetchError> {
        let url = Url::parse(&source.url).map_err(|e| FetchError::InvalidUrl {
            url: source.url.clone(),
            reason: e.to_string(),
        })?;

        let t0 = Instant::now();
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        let entries = parse_feed(&body)?;
        debug!(
            count = entries.len(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Parsed feed"
        );
        Ok(entries)
    }
}

/// Run one fetch under a hard deadline and tag the result with its source.
///
/// Never fails: every error, including the deadline expiring, is carried in
/// [`FetchOutcome::result`].
pub async fn fetch_outcome<F: FeedFetcher>(
    fetcher: &F,
    index: usize,
    source: SourceDescriptor,
    timeout: Duration,
) -> FetchOutcome {
    let result = match tokio::time::timeout(timeout, fetcher.fetch(&source)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout)),
    };
    if let Err(e) = &result {
        warn!(source = %source.name, error = %e, "Feed fetch failed; source contributes nothing this run");
    }
    FetchOutcome {
        index,
        source,
        result,
    }
}

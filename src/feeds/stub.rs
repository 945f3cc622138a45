//! In-memory [`FeedFetcher`] for tests.
//!
//! Responses are keyed by source display name. Unknown sources fail with
//! HTTP 404 so a typo in a test shows up as a "no related news" section
//! rather than silently passing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::FetchError;
use crate::feeds::fetch::FeedFetcher;
use crate::models::{FeedEntry, SourceDescriptor};

enum Response {
    Entries(Vec<FeedEntry>),
    Fail(u16),
    Slow(Duration),
}

#[derive(Default)]
pub(crate) struct StubFetcher {
    responses: HashMap<String, Response>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_entries(mut self, name: &str, entries: Vec<FeedEntry>) -> Self {
        self.responses.insert(name.to_string(), Response::Entries(entries));
        self
    }

    pub(crate) fn failing(mut self, name: &str, status: u16) -> Self {
        self.responses.insert(name.to_string(), Response::Fail(status));
        self
    }

    pub(crate) fn slow(mut self, name: &str, delay: Duration) -> Self {
        self.responses.insert(name.to_string(), Response::Slow(delay));
        self
    }

    /// Delay every response, to make concurrency observable.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl FeedFetcher for StubFetcher {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<Vec<FeedEntry>, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = match self.responses.get(&source.name) {
            Some(Response::Entries(entries)) => Ok(entries.clone()),
            Some(Response::Fail(status)) => Err(FetchError::Status(*status)),
            Some(Response::Slow(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(Vec::new())
            }
            None => Err(FetchError::Status(404)),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Shorthand for a dated Bangkok Post entry.
pub(crate) fn entry(title: &str, link: &str) -> FeedEntry {
    FeedEntry {
        title: title.to_string(),
        link: link.to_string(),
        published: Some("Tue, 06 May 2025 07:00:00 GMT".to_string()),
        source_name: "Bangkok Post".to_string(),
    }
}

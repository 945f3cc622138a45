//! Concurrent fetch orchestration.
//!
//! All sources of one request are fetched through a bounded worker pool
//! (`buffer_unordered`), so at most `concurrency` requests hit the backend at
//! once no matter how many sources a mode expands to. Outcomes are collected
//! as they complete; the caller gets every outcome, failed or not, once the
//! whole batch has finished.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{info, instrument};

use crate::feeds::fetch::{FeedFetcher, FetchOutcome, fetch_outcome};
use crate::models::SourceDescriptor;

/// How far a batch has progressed, reported after every completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share of the batch in `[0, 1]`; an empty batch counts as done.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }
}

/// Fetch every source with at most `concurrency` fetches in flight.
///
/// Returns one [`FetchOutcome`] per source in completion order; each outcome
/// carries its build-order `index`. `on_progress` runs after each completion.
/// A failing source never cancels its siblings, and no source is retried.
#[instrument(level = "info", skip_all, fields(sources = sources.len(), concurrency = concurrency))]
pub async fn fetch_all<F, P>(
    fetcher: &F,
    sources: &[SourceDescriptor],
    concurrency: usize,
    timeout: Duration,
    mut on_progress: P,
) -> Vec<FetchOutcome>
where
    F: FeedFetcher,
    P: FnMut(Progress),
{
    let total = sources.len();
    let t0 = Instant::now();

    let mut pending = stream::iter(sources.iter().cloned().enumerate())
        .map(|(index, source)| fetch_outcome(fetcher, index, source, timeout))
        .buffer_unordered(concurrency.max(1));

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = pending.next().await {
        outcomes.push(outcome);
        on_progress(Progress {
            completed: outcomes.len(),
            total,
        });
    }

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    let entries: usize = outcomes.iter().map(|o| o.entries().len()).sum();
    info!(
        total,
        failed,
        entries,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Completed feed batch"
    );
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::stub::{StubFetcher, entry};
    use std::sync::atomic::Ordering;

    fn sources(n: usize) -> Vec<SourceDescriptor> {
        (0..n)
            .map(|i| SourceDescriptor {
                name: format!("s{i}"),
                url: format!("https://example.invalid/rss/{i}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn returns_outcomes_for_all_sources_despite_failures() {
        let fetcher = StubFetcher::new()
            .with_entries("s0", vec![entry("a", "https://x/a")])
            .failing("s1", 503)
            .with_entries("s2", vec![])
            .failing("s3", 500)
            .with_entries("s4", vec![entry("b", "https://x/b")]);

        let outcomes = fetch_all(&fetcher, &sources(5), 5, Duration::from_secs(1), |_| {}).await;

        assert_eq!(outcomes.len(), 5);
        let mut indexes: Vec<usize> = outcomes.iter().map(|o| o.index).collect();
        indexes.sort();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
        assert_eq!(outcomes.iter().filter(|o| o.is_failure()).count(), 2);
    }

    #[tokio::test]
    async fn progress_is_reported_after_every_completion() {
        let fetcher = StubFetcher::new();
        let mut seen = Vec::new();
        fetch_all(&fetcher, &sources(4), 2, Duration::from_secs(1), |p| seen.push(p)).await;

        assert_eq!(seen.len(), 4);
        assert_eq!(seen.iter().map(|p| p.completed).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(seen.iter().all(|p| p.total == 4));
        assert_eq!(seen.last().unwrap().fraction(), 1.0);
    }

    #[tokio::test]
    async fn never_exceeds_the_concurrency_bound() {
        let fetcher = StubFetcher::new().with_delay(Duration::from_millis(20));
        let outcomes = fetch_all(&fetcher, &sources(12), 3, Duration::from_secs(2), |_| {}).await;

        assert_eq!(outcomes.len(), 12);
        let peak = fetcher.max_in_flight.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak concurrency was {peak}");
        assert!(peak >= 2, "fetches did not overlap (peak {peak})");
    }

    #[tokio::test]
    async fn empty_batch_completes_without_progress() {
        let fetcher = StubFetcher::new();
        let mut calls = 0;
        let outcomes = fetch_all(&fetcher, &[], 5, Duration::from_secs(1), |_| calls += 1).await;
        assert!(outcomes.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn fraction_of_partial_batch() {
        let p = Progress {
            completed: 1,
            total: 4,
        };
        assert_eq!(p.fraction(), 0.25);
        assert_eq!(
            Progress {
                completed: 0,
                total: 0
            }
            .fraction(),
            1.0
        );
    }
}

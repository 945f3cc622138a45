//! End-to-end aggregation for one request.
//!
//! The steps are always the same and always run in this order:
//!
//! 1. **Sources**: expand the request into source descriptors
//! 2. **Fetch**: run every source through the bounded worker pool
//! 3. **Report**: render outcomes in build order, dropping repeated titles
//! 4. **Archive**: merge this run's items into the persisted history
//!
//! Only an invalid request can fail; everything after validation degrades to
//! "contributes nothing" instead of erroring.

use std::time::Instant;

use tracing::{info, instrument};

use crate::aggregate::{Progress, fetch_all};
use crate::config::DeskConfig;
use crate::error::DeskError;
use crate::feeds::fetch::FeedFetcher;
use crate::feeds::query::sources_for;
use crate::models::{Archive, Mode, RequestConfig};
use crate::outputs::archive::ArchiveStore;
use crate::report::{Report, build_report};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: Report,
    /// The archive after this run's merge, whether or not it was persisted.
    pub archive: Archive,
}

/// Run an already-validated request.
///
/// # Arguments
///
/// * `request` - Mode, window and keyword
/// * `fetcher` - Feed backend
/// * `store` - Archive to merge into
/// * `config` - Pool size and per-fetch timeout
/// * `on_progress` - Called after every completed fetch
#[instrument(level = "info", skip_all, fields(mode = %request.mode, days = request.days))]
pub async fn run_request<F, S, P>(
    request: &RequestConfig,
    fetcher: &F,
    store: &S,
    config: &DeskConfig,
    on_progress: P,
) -> RunOutput
where
    F: FeedFetcher,
    S: ArchiveStore,
    P: FnMut(Progress),
{
    let t0 = Instant::now();
    let sources = sources_for(request);
    let outcomes = fetch_all(
        fetcher,
        &sources,
        config.concurrency,
        config.fetch_timeout(),
        on_progress,
    )
    .await;

    let report = build_report(request, &sources, &outcomes);
    let archive = store.merge_and_save(&report.items).await;

    info!(
        sources = sources.len(),
        items = report.items.len(),
        archived = archive.news_list.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Aggregation finished"
    );
    RunOutput { report, archive }
}

/// Validate `(days, mode, keyword)` and run it.
///
/// # Errors
///
/// [`DeskError::InvalidConfig`] when the request is invalid; nothing is
/// fetched or written in that case.
pub async fn run_aggregation<F, S, P>(
    days: u32,
    mode: Mode,
    keyword: Option<&str>,
    fetcher: &F,
    store: &S,
    config: &DeskConfig,
    on_progress: P,
) -> Result<RunOutput, DeskError>
where
    F: FeedFetcher,
    S: ArchiveStore,
    P: FnMut(Progress),
{
    let request = RequestConfig::new(mode, days, keyword)?;
    Ok(run_request(&request, fetcher, store, config, on_progress).await)
}

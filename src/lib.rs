//! # Thai News Desk
//!
//! Collects region-targeted Google News RSS results for a handful of fixed
//! topics (or a free-text keyword), folds them into a growing local JSON
//! archive, and renders an analyst-ready prompt for a general-purpose LLM.
//!
//! ## Architecture
//!
//! 1. **Query building** ([`feeds::query`]): mode + window → source descriptors
//! 2. **Fetching** ([`feeds::fetch`], [`aggregate`]): bounded concurrent fetches,
//!    failures captured per source
//! 3. **Reporting** ([`report`]): build-order sections, run-scoped title dedup
//! 4. **Archiving** ([`outputs::archive`]): link-keyed merge, newest first,
//!    bounded retention
//!
//! [`pipeline::run_aggregation`] runs all four for one request.
//!
//! ```no_run
//! use thai_news_desk::{DeskConfig, HttpFeedFetcher, JsonArchive, Mode, run_aggregation};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DeskConfig::default();
//! let fetcher = HttpFeedFetcher::from_config(&config)?;
//! let store = JsonArchive::new(&config.archive_path, config.max_archive_size);
//! let out = run_aggregation(7, Mode::Vip, None, &fetcher, &store, &config, |_| {}).await?;
//! println!("{}", out.report.text);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod feeds;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::DeskConfig;
pub use error::{DeskError, FetchError};
pub use feeds::fetch::{FeedFetcher, HttpFeedFetcher};
pub use feeds::query::build_sources;
pub use models::{Archive, Mode, NewsItem, RequestConfig, SourceDescriptor};
pub use outputs::archive::{ArchiveStore, JsonArchive};
pub use pipeline::{RunOutput, run_aggregation};

//! Google News RSS sources: query construction, fetching and parsing.
//!
//! Each request runs in three steps:
//!
//! 1. **Building**: [`query::build_sources`] turns a mode and window into an
//!    ordered list of named, fully-encoded feed URLs
//! 2. **Fetching**: a [`fetch::FeedFetcher`] downloads one feed; failures are
//!    captured in a [`fetch::FetchOutcome`] and never propagate
//! 3. **Parsing**: [`parse::parse_feed`] turns the RSS body into
//!    [`crate::models::FeedEntry`] values
//!
//! # Modes
//!
//! | Mode | Groups | Sources |
//! |------|--------|---------|
//! | `macro` | Politics & economy, Taiwan–Thailand relations | 4 |
//! | `industry` | PCB & electronics, Servers & data centres | 4 |
//! | `vip` | Tracked Taiwanese companies | 2 |
//! | `custom` | Operator keyword | 2 |
//!
//! Every group is queried once per locale (Traditional Chinese/Taiwan and
//! English/Thailand).

pub mod fetch;
pub mod parse;
pub mod query;

#[cfg(test)]
pub(crate) mod stub;

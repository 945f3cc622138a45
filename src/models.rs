//! Data models shared by the query builder, fetcher, report builder and archive.
//!
//! - [`Mode`] and [`RequestConfig`]: what the operator asked for
//! - [`SourceDescriptor`]: one fully-encoded query against the search backend
//! - [`FeedEntry`]: a raw entry as parsed from a feed, consumed immediately
//! - [`NewsItem`]: the normalized unit written to the report and the archive
//! - [`Archive`]: the persisted, newest-first collection of [`NewsItem`]s
//!
//! The archive types serialize to the on-disk JSON layout
//! (`timestamp` + `news_list` of `{title, link, date, source, category}`).

use crate::error::DeskError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The high-level search intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Thai politics, economy and Taiwan–Thailand relations.
    Macro,
    /// PCB, electronics manufacturing and server supply chain.
    Industry,
    /// Roster of tracked Taiwanese companies operating in Thailand.
    Vip,
    /// Free-text keyword supplied by the operator.
    Custom,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Macro => "macro",
            Mode::Industry => "industry",
            Mode::Vip => "vip",
            Mode::Custom => "custom",
        }
    }

    /// Per-source entry cap applied when rendering the report.
    ///
    /// Topic modes are capped to keep the prompt a manageable size; a custom
    /// keyword search is narrow enough to keep everything.
    pub fn entry_cap(&self) -> Option<usize> {
        match self {
            Mode::Custom => None,
            _ => Some(30),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One search invocation. Created per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub mode: Mode,
    /// Lookback window in days, always positive.
    pub days: u32,
    /// Required (non-blank) iff `mode` is [`Mode::Custom`].
    pub keyword: Option<String>,
}

impl RequestConfig {
    /// Validate and normalize a request.
    ///
    /// The keyword is trimmed; a blank keyword counts as absent.
    ///
    /// # Errors
    ///
    /// [`DeskError::InvalidConfig`] when `days` is zero or when `custom` mode is
    /// requested without a keyword.
    pub fn new(mode: Mode, days: u32, keyword: Option<&str>) -> Result<Self, DeskError> {
        if days == 0 {
            return Err(DeskError::InvalidConfig(
                "lookback window must be at least one day".into(),
            ));
        }
        let keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        if mode == Mode::Custom && keyword.is_none() {
            return Err(DeskError::InvalidConfig(
                "custom mode requires a non-empty keyword".into(),
            ));
        }
        Ok(Self {
            mode,
            days,
            keyword,
        })
    }
}

/// A named, fully-formed query against the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    /// Display label, carries an icon and a language tag.
    pub name: String,
    /// Fully percent-encoded feed URL.
    pub url: String,
}

/// An entry as parsed from a syndication feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    /// Treated as the globally unique identity of the story.
    pub link: String,
    pub published: Option<String>,
    /// Originating outlet; parsers fill in a fallback label when absent.
    pub source_name: String,
}

/// The normalized unit written to the report and persisted in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    /// Deduplication key within an [`Archive`].
    pub link: String,
    pub date: String,
    /// Originating outlet.
    pub source: String,
    /// Display name of the [`SourceDescriptor`] that produced the item.
    pub category: String,
}

/// The accumulating, bounded, deduplicated history of collected items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    /// Wall-clock stamp of the last write.
    #[serde(default)]
    pub timestamp: String,
    /// Newest first.
    #[serde(default)]
    pub news_list: Vec<NewsItem>,
}

//! RSS 2.0 parsing for Google News search feeds.
//!
//! Google News items look like:
//!
//! ```xml
//! <item>
//!   <title>Foxconn expands Thai EV plant - Bangkok Post</title>
//!   <link>https://news.google.com/rss/articles/...</link>
//!   <pubDate>Tue, 06 May 2025 07:00:00 GMT</pubDate>
//!   <source url="https://www.bangkokpost.com">Bangkok Post</source>
//! </item>
//! ```
//!
//! `pubDate` and `source` are optional. Items without a title or link are
//! dropped since they can neither be reported nor deduplicated.

use quick_xml::de::{DeError, from_str};
use serde::Deserialize;

use crate::models::FeedEntry;

/// Outlet label used when an item carries no `<source>` element.
pub const FALLBACK_OUTLET: &str = "Google News";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<ItemSource>,
}

#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "$text", default)]
    name: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse an RSS document into feed entries, preserving document order.
///
/// # Errors
///
/// Returns [`DeError`] when the body is not a well-formed RSS document.
/// A channel with no items is not an error.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, DeError> {
    let rss: Rss = from_str(xml)?;
    let entries = rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let title = non_empty(item.title)?;
            let link = non_empty(item.link)?;
            Some(FeedEntry {
                title,
                link,
                published: non_empty(item.pub_date),
                source_name: item
                    .source
                    .and_then(|s| non_empty(s.name))
                    .unwrap_or_else(|| FALLBACK_OUTLET.to_string()),
            })
        })
        .collect();
    Ok(entries)
}

//! Incremental, bounded archive of collected news items.
//!
//! The archive is a single JSON document that grows across independent runs:
//!
//! ```json
//! {
//!   "timestamp": "2025-05-06 08:00:00",
//!   "news_list": [
//!     {"title": "...", "link": "...", "date": "...", "source": "...", "category": "..."}
//!   ]
//! }
//! ```
//!
//! `link` is the identity key: no two items with the same link are ever
//! stored together. New items go to the front, and the list is cut back to
//! the retention bound after every merge, dropping the oldest items.
//!
//! # Failure Policy
//!
//! Reading is permissive: a missing, unreadable or corrupt file is treated as
//! an empty archive. A failed write is logged and the merged archive is still
//! returned, so a search never fails because history could not be saved.
//!
//! # Concurrency
//!
//! One writer at a time is assumed. Two processes merging into the same file
//! concurrently can lose each other's updates.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};

use crate::error::DeskError;
use crate::models::{Archive, NewsItem};

/// Storage behind the archive.
///
/// Merge and retention live in [`merge_items`] and do not depend on the
/// backend, so a keyed store can replace the JSON file without changing them.
pub trait ArchiveStore {
    /// Current archive; absent or unreadable storage yields an empty one.
    async fn load(&self) -> Archive;
    async fn save(&self, archive: &Archive) -> Result<(), DeskError>;
    /// Retention bound applied on every merge.
    fn max_size(&self) -> usize;

    /// Load, merge, stamp and persist. Never fails the caller.
    ///
    /// Returns the merged archive whether or not the write succeeded.
    async fn merge_and_save(&self, new_items: &[NewsItem]) -> Archive {
        let mut archive = self.load().await;
        let before = archive.news_list.len();
        let added = merge_items(&mut archive.news_list, new_items, self.max_size());
        archive.timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        info!(
            incoming = new_items.len(),
            before,
            added,
            after = archive.news_list.len(),
            "Merged items into archive"
        );

        if let Err(e) = self.save(&archive).await {
            error!(error = %e, "Failed to persist archive; keeping this run's results in memory only");
        }
        archive
    }
}

/// Merge `new_items` into `existing`, newest first, then apply retention.
///
/// Each new item whose link is not yet present is inserted at the front of
/// the list, so a batch ends up in reverse of its input order ahead of all
/// older items. Duplicate links within `new_items` are inserted once, and a
/// link repeated in `existing` keeps only its first (newest) copy.
/// Returns the number of items actually inserted.
pub fn merge_items(existing: &mut Vec<NewsItem>, new_items: &[NewsItem], max_size: usize) -> usize {
    let mut seen: HashSet<String> = HashSet::with_capacity(existing.len() + new_items.len());
    let before = existing.len();
    existing.retain(|i| seen.insert(i.link.clone()));
    if existing.len() < before {
        warn!(dropped = before - existing.len(), "Archive held repeated links; keeping newest copies");
    }
    let mut fresh = Vec::new();
    for item in new_items {
        if seen.insert(item.link.clone()) {
            fresh.push(item.clone());
        }
    }
    let added = fresh.len();

    fresh.reverse();
    fresh.append(existing);
    fresh.truncate(max_size);
    *existing = fresh;
    added
}

/// Case-insensitive title search over the archive, newest first.
///
/// An empty `needle` matches everything. When `category` is given, only items
/// whose category contains it (case-insensitively) are returned.
pub fn search<'a>(
    archive: &'a Archive,
    needle: &str,
    category: Option<&str>,
    limit: usize,
) -> Vec<&'a NewsItem> {
    let needle = needle.to_lowercase();
    let category = category.map(str::to_lowercase);
    archive
        .news_list
        .iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .filter(|item| {
            category
                .as_deref()
                .is_none_or(|c| item.category.to_lowercase().contains(c))
        })
        .take(limit)
        .collect()
}

/// Plain-text listing of `hits` for the terminal, headed by archive stats.
///
/// An archive counts as empty by its items, not its timestamp, so a
/// hand-edited file without a stamp still lists what it holds.
pub fn render_history(archive: &Archive, hits: &[&NewsItem]) -> String {
    if archive.news_list.is_empty() {
        return "Archive is empty.\n".to_string();
    }
    let updated = if archive.timestamp.is_empty() {
        "at an unknown time"
    } else {
        archive.timestamp.as_str()
    };
    let mut out = format!(
        "Archive updated {} ({} items, showing {})\n\n",
        updated,
        archive.news_list.len(),
        hits.len()
    );
    for item in hits {
        out.push_str(&format!(
            "- [{}] [{}] {}\n  Category: {}\n  Link: {}\n",
            item.date, item.source, item.title, item.category, item.link
        ));
    }
    out
}

/// The archive as a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonArchive {
    path: PathBuf,
    max_size: usize,
}

impl JsonArchive {
    pub fn new(path: impl Into<PathBuf>, max_size: usize) -> Self {
        Self {
            path: path.into(),
            max_size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ArchiveStore for JsonArchive {
    fn max_size(&self) -> usize {
        self.max_size
    }

    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    async fn load(&self) -> Archive {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No archive yet; starting empty");
                return Archive::default();
            }
            Err(e) => {
                warn!(error = %e, "Archive unreadable; treating as empty");
                return Archive::default();
            }
        };
        match serde_json::from_str::<Archive>(&raw) {
            Ok(archive) => archive,
            Err(e) => {
                warn!(error = %e, "Archive corrupt; treating as empty");
                Archive::default()
            }
        }
    }

    /// Write the whole document to a sibling temp file, then rename it over
    /// the archive so readers never see a half-written file.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display(), items = archive.news_list.len()))]
    async fn save(&self, archive: &Archive) -> Result<(), DeskError> {
        let json = serde_json::to_string_pretty(archive)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .await
            .map_err(|e| DeskError::io(tmp.display().to_string(), e))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(DeskError::io(self.path.display().to_string(), e));
        }
        debug!("Wrote archive");
        Ok(())
    }
}

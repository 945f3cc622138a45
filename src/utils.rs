//! Utility functions for window labels, log truncation and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Human-readable labels for the lookback window
//! - String truncation for logging long titles and URLs
//! - File system validation for output directories

use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

use crate::error::DeskError;

/// Label a lookback window the way the operator's date presets name it.
///
/// The presets are 24 hours, 3 days, 1 week, 2 weeks and 1 month; any other
/// value falls back to `"<n> days"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(window_label(1), "24 hours");
/// assert_eq!(window_label(14), "2 weeks");
/// assert_eq!(window_label(5), "5 days");
/// ```
pub fn window_label(days: u32) -> String {
    match days {
        1 => "24 hours".to_string(),
        7 => "1 week".to_string(),
        14 => "2 weeks".to_string(),
        30 => "1 month".to_string(),
        n => format!("{n} days"),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and a
/// count of the dropped characters appended. Counting is done in characters,
/// not bytes, since titles are frequently CJK.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 chars)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", head, total - max)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// [`DeskError::Io`] if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), DeskError> {
    let display = path.display().to_string();
    fs::create_dir_all(path)
        .await
        .map_err(|e| DeskError::io(&display, e))?;

    let probe_path = path.join("..__probe_write__");
    fs::write(&probe_path, b"")
        .await
        .map_err(|e| DeskError::io(&display, e))?;
    let _ = fs::remove_file(&probe_path).await;
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_label_presets() {
        assert_eq!(window_label(1), "24 hours");
        assert_eq!(window_label(3), "3 days");
        assert_eq!(window_label(7), "1 week");
        assert_eq!(window_label(14), "2 weeks");
        assert_eq!(window_label(30), "1 month");
        assert_eq!(window_label(5), "5 days");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 chars)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("鴻海宣布在泰國擴廠", 2);
        assert_eq!(result, "鴻海…(+7 chars)");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("reports").join("daily");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__probe_write__").exists());
    }
}

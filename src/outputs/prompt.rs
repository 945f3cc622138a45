//! Report files for operators who prefer a file over the terminal.
//!
//! One file per day and mode: a second run of the same mode on the same day
//! overwrites the first, so the directory holds the latest prompt of each.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tokio::fs;
use tracing::{info, instrument};

use crate::error::DeskError;
use crate::models::Mode;
use crate::report::Report;
use crate::utils::ensure_writable_dir;

/// `<report_dir>/<YYYY-MM-DD>_<mode>.txt`
pub fn report_path(report_dir: &Path, date: NaiveDate, mode: Mode) -> PathBuf {
    report_dir.join(format!("{}_{}.txt", date.format("%Y-%m-%d"), mode.as_str()))
}

/// Write the report text under today's local date.
///
/// # Arguments
///
/// * `report` - The generated report
/// * `mode` - Mode the report was generated for
/// * `report_dir` - Target directory; created if missing
///
/// # Returns
///
/// The path written to.
#[instrument(level = "info", skip_all, fields(report_dir = %report_dir.display(), mode = %mode))]
pub async fn write_report(
    report: &Report,
    mode: Mode,
    report_dir: &Path,
) -> Result<PathBuf, DeskError> {
    ensure_writable_dir(report_dir).await?;

    let path = report_path(report_dir, Local::now().date_naive(), mode);
    fs::write(&path, &report.text)
        .await
        .map_err(|e| DeskError::io(path.display().to_string(), e))?;
    info!(path = %path.display(), bytes = report.text.len(), "Wrote report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_uses_date_and_mode() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        let path = report_path(Path::new("reports"), date, Mode::Industry);
        assert_eq!(path, Path::new("reports/2025-05-06_industry.txt"));
    }

    #[tokio::test]
    async fn writes_report_text_into_new_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports");
        let report = Report {
            text: "## 【A】\n(no related news)\n".into(),
            items: Vec::new(),
        };

        let path = write_report(&report, Mode::Vip, &dir).await.unwrap();

        assert!(path.starts_with(&dir));
        assert!(path.to_string_lossy().ends_with("_vip.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), report.text);
    }
}

//! Command-line interface definitions for Thai News Desk.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The config file can also be given through an environment variable; every
//! other flag overrides the value loaded from that file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DeskConfig;
use crate::models::Mode;

/// Command-line arguments for the Thai News Desk application.
///
/// # Examples
///
/// ```sh
/// # This week's Taiwanese-company coverage
/// thai_news_desk search --mode vip --days 7
///
/// # Free-text keyword, report also saved under ./reports
/// thai_news_desk search -m custom -k "Delta Electronics" --report-dir ./reports
///
/// # Browse what has been collected so far
/// thai_news_desk history --query foxconn --limit 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "THAI_NEWS_DESK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Archive JSON file (overrides `archive_path` from the config)
    #[arg(short, long, global = true)]
    pub archive: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch news, print the prompt and merge results into the archive
    Search(SearchArgs),
    /// Browse the archive
    History(HistoryArgs),
    /// Print the feed queries a search would run, without fetching
    Sources(QueryArgs),
}

/// What to search for.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Topic preset, or `custom` together with --keyword
    #[arg(short, long, value_enum)]
    pub mode: Mode,

    /// Free-text keyword for custom mode
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Lookback window in days (1, 3, 7, 14 and 30 have friendly labels)
    #[arg(short, long, default_value_t = 1)]
    pub days: u32,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Maximum concurrent feed fetches
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-fetch timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Also write the report to `<dir>/<date>_<mode>.txt`
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Case-insensitive title substring; empty matches everything
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Only items whose category contains this text
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum number of items to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Print matching items as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut DeskConfig) {
        if let Some(archive) = &self.archive {
            config.archive_path = archive.clone();
        }
        if let Command::Search(args) = &self.command {
            if let Some(concurrency) = args.concurrency {
                config.concurrency = concurrency;
            }
            if let Some(secs) = args.timeout_secs {
                config.fetch_timeout_secs = secs;
            }
            if let Some(dir) = &args.report_dir {
                config.report_dir = Some(dir.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_search_parsing() {
        let cli = Cli::parse_from([
            "thai_news_desk",
            "search",
            "--mode",
            "custom",
            "--keyword",
            "Delta Electronics",
            "--days",
            "14",
        ]);

        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query.mode, Mode::Custom);
                assert_eq!(args.query.keyword.as_deref(), Some("Delta Electronics"));
                assert_eq!(args.query.days, 14);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_short_flags_and_defaults() {
        let cli = Cli::parse_from(["thai_news_desk", "sources", "-m", "vip"]);
        match cli.command {
            Command::Sources(args) => {
                assert_eq!(args.mode, Mode::Vip);
                assert_eq!(args.days, 1);
                assert!(args.keyword.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_history_defaults() {
        let cli = Cli::parse_from(["thai_news_desk", "history"]);
        match cli.command {
            Command::History(args) => {
                assert_eq!(args.query, "");
                assert_eq!(args.limit, 20);
                assert!(!args.json);
                assert!(args.category.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["thai_news_desk", "search", "--mode", "sports"]).is_err());
    }

    #[test]
    fn test_overrides_win_over_config() {
        let cli = Cli::parse_from([
            "thai_news_desk",
            "search",
            "-m",
            "macro",
            "--archive",
            "/tmp/archive.json",
            "--concurrency",
            "2",
            "--timeout-secs",
            "30",
            "--report-dir",
            "out",
        ]);
        let mut config = DeskConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.archive_path, PathBuf::from("/tmp/archive.json"));
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert_eq!(config.report_dir, Some(PathBuf::from("out")));
    }
}

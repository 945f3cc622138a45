//! # Thai News Desk
//!
//! Operator CLI over the aggregation pipeline: builds region-targeted Google
//! News queries, fetches them concurrently, prints an analyst-ready prompt and
//! merges what was found into the local archive.
//!
//! ## Usage
//!
//! ```sh
//! thai_news_desk search --mode macro --days 7
//! thai_news_desk history --query foxconn
//! ```

use std::error::Error;

use clap::Parser;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use thai_news_desk::aggregate::Progress;
use thai_news_desk::cli::{Cli, Command, HistoryArgs, QueryArgs, SearchArgs};
use thai_news_desk::config::DeskConfig;
use thai_news_desk::feeds::fetch::HttpFeedFetcher;
use thai_news_desk::feeds::query::build_sources;
use thai_news_desk::models::RequestConfig;
use thai_news_desk::outputs::archive::{ArchiveStore, JsonArchive, render_history, search};
use thai_news_desk::outputs::prompt::write_report;
use thai_news_desk::pipeline::run_request;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = DeskConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;
    info!(archive = %config.archive_path.display(), "thai_news_desk starting up");

    let store = JsonArchive::new(&config.archive_path, config.max_archive_size);

    match &args.command {
        Command::Search(search_args) => run_search(search_args, &config, &store).await?,
        Command::History(history_args) => show_history(history_args, &store).await?,
        Command::Sources(query) => show_sources(query)?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

async fn run_search(
    args: &SearchArgs,
    config: &DeskConfig,
    store: &JsonArchive,
) -> Result<(), Box<dyn Error>> {
    let query = &args.query;
    let request = RequestConfig::new(query.mode, query.days, query.keyword.as_deref())?;
    let fetcher = HttpFeedFetcher::from_config(config)?;

    let out = run_request(&request, &fetcher, store, config, |p: Progress| {
        info!(
            completed = p.completed,
            total = p.total,
            percent = (p.fraction() * 100.0).round() as u32,
            "Fetch progress"
        );
    })
    .await;

    if let Some(dir) = &config.report_dir {
        // The prompt is still printed below, so a failed copy is not fatal.
        if let Err(e) = write_report(&out.report, request.mode, dir).await {
            error!(error = %e, "Failed to write report file");
        }
    }

    println!("{}", out.report.text);
    info!(
        new_items = out.report.items.len(),
        archive_items = out.archive.news_list.len(),
        updated = %out.archive.timestamp,
        "Search complete"
    );
    Ok(())
}

async fn show_history(args: &HistoryArgs, store: &JsonArchive) -> Result<(), Box<dyn Error>> {
    let archive = store.load().await;
    let hits = search(&archive, &args.query, args.category.as_deref(), args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    print!("{}", render_history(&archive, &hits));
    Ok(())
}

fn show_sources(query: &QueryArgs) -> Result<(), Box<dyn Error>> {
    let sources = build_sources(query.days, query.mode, query.keyword.as_deref())?;
    for source in sources {
        println!("{}\n  {}", source.name, source.url);
    }
    Ok(())
}

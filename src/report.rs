//! Report assembly and run-scoped title deduplication.
//!
//! The report is the text an operator pastes into a general-purpose LLM: a
//! mode-specific analyst brief, then one section per source in build order,
//! then a closing marker. Sources that produced nothing still get a section
//! so backend coverage is visible per category.
//!
//! # Layout
//!
//! ```text
//! <preamble>
//!
//! ========= News database: past 1 week =========
//!
//! ## 【🔌 PCB & electronics (EN)】
//! - [Tue, 06 May 2025 07:00:00 GMT] [Bangkok Post] Thai PCB exports hit record
//!   Link: https://news.google.com/rss/articles/...
//!
//! ## 【🔌 PCB & electronics (中)】
//! (no related news)
//!
//! ========= End of data =========
//! ```

use std::collections::HashSet;

use tracing::{debug, info};

use crate::feeds::fetch::FetchOutcome;
use crate::models::{Mode, NewsItem, RequestConfig, SourceDescriptor};
use crate::utils::{truncate_for_log, window_label};

/// Line emitted under a source header when the source contributed nothing.
pub const NO_NEWS_MARKER: &str = "(no related news)";
/// Rendered in place of a missing publication date.
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const END_MARKER: &str = "========= End of data =========";

/// The generated prompt text and the items it lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    /// Exactly the non-duplicate entries emitted into `text`, in report order.
    pub items: Vec<NewsItem>,
}

/// Analyst brief placed verbatim at the top of the report.
pub fn preamble(request: &RequestConfig) -> String {
    let label = window_label(request.days);
    match request.mode {
        Mode::Macro => format!(
            "Act as a senior Southeast Asia political-economy analyst.\n\
             Below is a database of Thailand news collected over the past {label}.\n\
             \n\
             Read the headlines and outlets and produce an in-depth briefing in three parts:\n\
             \n\
             ### 1. 🇹🇭 Thailand headline developments\n\
             - Politics (elections, cabinet), major economic policy, security incidents.\n\
             - List the 3-5 most consequential events.\n\
             \n\
             ### 2. 💰 Macro environment\n\
             - Growth, currency, trade and infrastructure signals.\n\
             \n\
             ### 3. 🇹🇼 Taiwan–Thailand relations\n\
             - Taiwanese investment, bilateral trade agreements, talent exchange, geopolitics.\n\
             - Point out opportunities and risks for Taiwanese businesses in Thailand.\n\
             \n\
             Answer in Traditional Chinese, as a professional and readable Markdown list."
        ),
        Mode::Industry => format!(
            "Act as a senior electronics supply-chain consultant focused on Thailand.\n\
             Below is a database of Thailand industry news collected over the past {label}.\n\
             \n\
             Produce a briefing covering:\n\
             \n\
             ### 1. 🔌 PCB and electronics manufacturing\n\
             - New plants (especially PCB), supply-chain relocation, large investments.\n\
             \n\
             ### 2. 🖥️ Servers, data centres and semiconductors\n\
             - Capacity announcements by hyperscalers and Taiwanese ODMs.\n\
             \n\
             ### 3. 🎯 Implications\n\
             - What these moves mean for the global electronics supply chain.\n\
             \n\
             Answer in Traditional Chinese, as a professional and readable Markdown list."
        ),
        Mode::Vip => format!(
            "Act as an investment analyst tracking major Taiwanese companies in Thailand.\n\
             Below is a database of news about the tracked companies over the past {label}.\n\
             \n\
             For each company that appears:\n\
             - Summarize the news (expansion, orders, labour, incentives, disputes).\n\
             - Rate the business impact as positive, neutral or negative, with one line of reasoning.\n\
             \n\
             Close with cross-company themes worth watching.\n\
             Answer in Traditional Chinese, as a professional and readable Markdown list."
        ),
        Mode::Custom => format!(
            "Act as a senior research analyst.\n\
             Below is a database of news matching the keyword \"{keyword}\" over the past {label}.\n\
             \n\
             Summarize the key developments, the main actors involved and the likely next steps.\n\
             Answer in Traditional Chinese, as a professional and readable Markdown list.",
            keyword = request.keyword.as_deref().unwrap_or_default()
        ),
    }
}

/// Build the report from fetch outcomes.
///
/// Sections follow `sources` order regardless of the order outcomes arrive
/// in. Within a source at most `mode.entry_cap()` entries are considered; an
/// entry whose exact title was already emitted earlier in this run (from any
/// source) is skipped from both the text and `items`.
pub fn build_report(
    request: &RequestConfig,
    sources: &[SourceDescriptor],
    outcomes: &[FetchOutcome],
) -> Report {
    let mut by_index: Vec<Option<&FetchOutcome>> = vec![None; sources.len()];
    for outcome in outcomes {
        if let Some(slot) = by_index.get_mut(outcome.index) {
            *slot = Some(outcome);
        }
    }

    let mut text = preamble(request);
    text.push_str(&format!(
        "\n\n========= News database: past {} =========\n",
        window_label(request.days)
    ));

    let cap = request.mode.entry_cap().unwrap_or(usize::MAX);
    let mut seen_titles: HashSet<&str> = HashSet::new();
    let mut items = Vec::new();
    let mut duplicates = 0usize;

    for (source, outcome) in sources.iter().zip(by_index) {
        text.push_str(&format!("\n## 【{}】\n", source.name));
        let entries = outcome.map(|o| o.entries()).unwrap_or_default();
        if entries.is_empty() {
            text.push_str(NO_NEWS_MARKER);
            text.push('\n');
            continue;
        }

        let mut emitted = 0usize;
        for entry in entries.iter().take(cap) {
            if !seen_titles.insert(entry.title.as_str()) {
                debug!(
                    source = %source.name,
                    title = %truncate_for_log(&entry.title, 80),
                    "Skipping title already listed this run"
                );
                duplicates += 1;
                continue;
            }
            let date = entry.published.as_deref().unwrap_or(UNKNOWN_DATE);
            text.push_str(&format!(
                "- [{}] [{}] {}\n  Link: {}\n",
                date, entry.source_name, entry.title, entry.link
            ));
            items.push(NewsItem {
                title: entry.title.clone(),
                link: entry.link.clone(),
                date: date.to_string(),
                source: entry.source_name.clone(),
                category: source.name.clone(),
            });
            emitted += 1;
        }
        debug!(source = %source.name, emitted, "Rendered section");
    }

    text.push_str(&format!("\n{END_MARKER}\n"));
    info!(
        mode = %request.mode,
        items = items.len(),
        duplicates,
        "Built report"
    );
    Report { text, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::feeds::stub::entry;
    use crate::models::FeedEntry;

    fn src(name: &str) -> SourceDescriptor {
        SourceDescriptor {
            name: name.into(),
            url: format!("https://example.invalid/{name}"),
        }
    }

    fn ok(index: usize, name: &str, entries: Vec<FeedEntry>) -> FetchOutcome {
        FetchOutcome {
            index,
            source: src(name),
            result: Ok(entries),
        }
    }

    fn failed(index: usize, name: &str) -> FetchOutcome {
        FetchOutcome {
            index,
            source: src(name),
            result: Err(FetchError::Status(503)),
        }
    }

    fn macro_request() -> RequestConfig {
        RequestConfig::new(Mode::Macro, 7, None).unwrap()
    }

    #[test]
    fn overlapping_sources_dedup_by_title_in_build_order() {
        let sources = vec![src("A"), src("B")];
        // B completes first; report order must still follow build order.
        let outcomes = vec![
            ok(
                1,
                "B",
                vec![entry("T2", "https://x/b2"), entry("T4", "https://x/b4")],
            ),
            ok(
                0,
                "A",
                vec![
                    entry("T1", "https://x/a1"),
                    entry("T2", "https://x/a2"),
                    entry("T3", "https://x/a3"),
                ],
            ),
        ];

        let report = build_report(&macro_request(), &sources, &outcomes);

        let titles: Vec<&str> = report.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["T1", "T2", "T3", "T4"]);
        let t2 = &report.items[1];
        assert_eq!(t2.category, "A");
        assert_eq!(t2.link, "https://x/a2");

        assert_eq!(report.text.matches("## 【").count(), 2);
        assert!(report.text.find("## 【A】").unwrap() < report.text.find("## 【B】").unwrap());
        assert_eq!(report.text.matches("] T2\n").count(), 1);
        assert!(!report.text.contains(NO_NEWS_MARKER));
    }

    #[test]
    fn failed_and_empty_sources_get_marker_sections() {
        let sources = vec![src("A"), src("B"), src("C"), src("D")];
        let outcomes = vec![
            ok(0, "A", vec![entry("T1", "https://x/1")]),
            failed(1, "B"),
            ok(2, "C", vec![]),
            failed(3, "D"),
        ];

        let report = build_report(&macro_request(), &sources, &outcomes);

        assert_eq!(report.text.matches("## 【").count(), 4);
        assert_eq!(report.text.matches(NO_NEWS_MARKER).count(), 3);
        assert_eq!(report.items.len(), 1);
        assert!(report.text.contains("## 【B】\n(no related news)"));
    }

    #[test]
    fn missing_outcome_renders_as_no_news() {
        let sources = vec![src("A")];
        let report = build_report(&macro_request(), &sources, &[]);
        assert!(report.text.contains("## 【A】\n(no related news)"));
        assert!(report.items.is_empty());
    }

    #[test]
    fn topic_modes_cap_entries_per_source() {
        let entries: Vec<FeedEntry> = (0..40)
            .map(|i| entry(&format!("T{i}"), &format!("https://x/{i}")))
            .collect();
        let report = build_report(&macro_request(), &[src("A")], &[ok(0, "A", entries)]);
        assert_eq!(report.items.len(), 30);
    }

    #[test]
    fn custom_mode_is_uncapped() {
        let entries: Vec<FeedEntry> = (0..40)
            .map(|i| entry(&format!("T{i}"), &format!("https://x/{i}")))
            .collect();
        let request = RequestConfig::new(Mode::Custom, 3, Some("Delta")).unwrap();
        let report = build_report(&request, &[src("A")], &[ok(0, "A", entries)]);
        assert_eq!(report.items.len(), 40);
        assert!(report.text.contains("\"Delta\""));
    }

    #[test]
    fn entry_line_format_and_unknown_date() {
        let mut e = entry("Foxconn expands", "https://x/f");
        e.published = None;
        let report = build_report(&macro_request(), &[src("A")], &[ok(0, "A", vec![e])]);
        assert!(report.text.contains(
            "- [Unknown Date] [Bangkok Post] Foxconn expands\n  Link: https://x/f\n"
        ));
        assert_eq!(report.items[0].date, UNKNOWN_DATE);
        assert_eq!(report.items[0].source, "Bangkok Post");
    }

    #[test]
    fn report_starts_with_mode_preamble_and_ends_with_marker() {
        let request = RequestConfig::new(Mode::Vip, 14, None).unwrap();
        let report = build_report(&request, &[], &[]);
        assert!(report.text.starts_with(&preamble(&request)));
        assert!(report.text.contains("past 2 weeks"));
        assert!(report.text.trim_end().ends_with(END_MARKER));
    }

    #[test]
    fn preambles_differ_per_mode() {
        let macro_text = preamble(&macro_request());
        let industry = preamble(&RequestConfig::new(Mode::Industry, 7, None).unwrap());
        assert_ne!(macro_text, industry);
        assert!(industry.contains("PCB"));
    }
}

//! Query builder for the Google News RSS search backend.
//!
//! Every request mode expands into an ordered list of [`SourceDescriptor`]s,
//! one per topic group and locale. The `q` parameter is assembled as a single
//! plain-text expression (base term, parenthesized `OR` group, `when:Nd`
//! directive) and percent-encoded exactly once with [`urlencoding::encode`],
//! so spaces are always `%20` and no raw non-ASCII byte reaches the URL.
//!
//! # URL Shape
//!
//! ```text
//! https://news.google.com/rss/search?q=Thailand%20%28PCB%20OR%20...%29%20when%3A7d&hl=en-TH&gl=TH&ceid=TH:en
//! ```

use itertools::Itertools;
use once_cell::sync::Lazy;
use tracing::{debug, instrument};

use crate::error::DeskError;
use crate::models::{Mode, RequestConfig, SourceDescriptor};

const SEARCH_ENDPOINT: &str = "https://news.google.com/rss/search";

/// Locale and region selectors understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Short tag appended to display names.
    pub tag: &'static str,
    /// Base keyword that anchors every topic query to the region.
    pub base_term: &'static str,
    pub hl: &'static str,
    pub gl: &'static str,
    pub ceid: &'static str,
}

/// Traditional Chinese results as seen from Taiwan.
pub const ZH_TW: Locale = Locale {
    tag: "中",
    base_term: "泰國",
    hl: "zh-TW",
    gl: "TW",
    ceid: "TW:zh-Hant",
};

/// English results as seen from Thailand.
pub const EN_TH: Locale = Locale {
    tag: "EN",
    base_term: "Thailand",
    hl: "en-TH",
    gl: "TH",
    ceid: "TH:en",
};

/// Locales queried for every mode, in build order.
pub static LOCALES: [Locale; 2] = [ZH_TW, EN_TH];

/// A boolean keyword group, spelled once per locale.
struct TopicGroup {
    icon: &'static str,
    label: &'static str,
    terms_zh: &'static [&'static str],
    terms_en: &'static [&'static str],
}

impl TopicGroup {
    fn terms(&self, locale: &Locale) -> &'static [&'static str] {
        if *locale == ZH_TW {
            self.terms_zh
        } else {
            self.terms_en
        }
    }
}

const MACRO_GROUPS: &[TopicGroup] = &[
    TopicGroup {
        icon: "🇹🇭",
        label: "Politics & economy",
        terms_zh: &["政治", "經濟", "選舉", "內閣", "政策"],
        terms_en: &["politics", "economy", "election", "cabinet", "policy"],
    },
    TopicGroup {
        icon: "🇹🇼",
        label: "Taiwan–Thailand relations",
        terms_zh: &["台灣", "台商", "台泰", "投資"],
        terms_en: &["Taiwan", "Taiwanese investment", "Taiwan companies", "trade relations"],
    },
];

const INDUSTRY_GROUPS: &[TopicGroup] = &[
    TopicGroup {
        icon: "🔌",
        label: "PCB & electronics",
        terms_zh: &["PCB", "電路板", "印刷電路板", "電子製造"],
        terms_en: &["PCB", "Printed Circuit Board", "Electronics Manufacturing"],
    },
    TopicGroup {
        icon: "🖥️",
        label: "Servers & data centres",
        terms_zh: &["伺服器", "資料中心", "半導體"],
        terms_en: &["Server Production", "data center", "semiconductor"],
    },
];

/// Tracked Taiwanese companies, English names.
pub const VIP_COMPANIES_EN: &[&str] = &[
    "Foxconn",
    "Hon Hai",
    "Pegatron",
    "Delta Electronics",
    "Compal",
    "Gogoro",
    "Kymco",
    "Pou Chen",
    "Eclat Textile",
    "Cheng Shin",
    "CTBC Bank",
    "ASUS",
    "Acer",
];

/// Tracked Taiwanese companies, Chinese names.
pub const VIP_COMPANIES_ZH: &[&str] = &[
    "鴻海", "富士康", "和碩", "台達電", "仁寶", "Gogoro", "光陽", "寶成", "儒鴻", "正新", "中信銀",
    "華碩", "宏碁",
];

static VIP_GROUP_ZH: Lazy<String> = Lazy::new(|| or_group(VIP_COMPANIES_ZH, true));
static VIP_GROUP_EN: Lazy<String> = Lazy::new(|| or_group(VIP_COMPANIES_EN, true));

/// Join terms with `OR` inside parentheses.
///
/// Multi-word terms are always quoted; `quote_all` quotes every term, which
/// the company roster uses so names only match as exact phrases.
fn or_group(terms: &[&str], quote_all: bool) -> String {
    let joined = terms
        .iter()
        .map(|t| {
            if quote_all || t.contains(char::is_whitespace) {
                format!("\"{t}\"")
            } else {
                (*t).to_string()
            }
        })
        .join(" OR ");
    format!("({joined})")
}

/// Build the feed URL for a plain-text expression, a window and a locale.
///
/// The whole expression, including the `when:` directive, is encoded in one
/// pass so the URL carries a single encoding scheme.
pub fn feed_url(expression: &str, days: u32, locale: &Locale) -> String {
    let q = format!("{expression} when:{days}d");
    format!(
        "{}?q={}&hl={}&gl={}&ceid={}",
        SEARCH_ENDPOINT,
        urlencoding::encode(&q),
        locale.hl,
        locale.gl,
        locale.ceid
    )
}

fn topic_sources(groups: &[TopicGroup], days: u32) -> Vec<SourceDescriptor> {
    groups
        .iter()
        .flat_map(|group| {
            LOCALES.iter().map(move |locale| {
                let expression = format!(
                    "{} {}",
                    locale.base_term,
                    or_group(group.terms(locale), false)
                );
                SourceDescriptor {
                    name: format!("{} {} ({})", group.icon, group.label, locale.tag),
                    url: feed_url(&expression, days, locale),
                }
            })
        })
        .collect()
}

fn vip_sources(days: u32) -> Vec<SourceDescriptor> {
    LOCALES
        .iter()
        .map(|locale| {
            let roster = if *locale == ZH_TW {
                VIP_GROUP_ZH.as_str()
            } else {
                VIP_GROUP_EN.as_str()
            };
            let expression = format!("{} {}", locale.base_term, roster);
            SourceDescriptor {
                name: format!("🏢 Taiwanese firms ({})", locale.tag),
                url: feed_url(&expression, days, locale),
            }
        })
        .collect()
}

fn custom_sources(keyword: &str, days: u32) -> Vec<SourceDescriptor> {
    LOCALES
        .iter()
        .map(|locale| SourceDescriptor {
            name: format!("🔍 {} ({})", keyword, locale.tag),
            url: feed_url(keyword, days, locale),
        })
        .collect()
}

/// Produce the ordered source list for a mode and window.
///
/// Same inputs always yield the same descriptors in the same order.
///
/// # Errors
///
/// [`DeskError::InvalidConfig`] when `days` is zero, or when `mode` is
/// [`Mode::Custom`] and `keyword` is absent or blank.
#[instrument(level = "debug")]
pub fn build_sources(
    days: u32,
    mode: Mode,
    keyword: Option<&str>,
) -> Result<Vec<SourceDescriptor>, DeskError> {
    let request = RequestConfig::new(mode, days, keyword)?;
    Ok(sources_for(&request))
}

/// Source list for an already-validated request.
pub fn sources_for(request: &RequestConfig) -> Vec<SourceDescriptor> {
    let sources = match (request.mode, request.keyword.as_deref()) {
        (Mode::Custom, Some(keyword)) => custom_sources(keyword, request.days),
        // RequestConfig::new guarantees a keyword for custom mode.
        (Mode::Custom, None) => Vec::new(),
        (Mode::Macro, _) => topic_sources(MACRO_GROUPS, request.days),
        (Mode::Industry, _) => topic_sources(INDUSTRY_GROUPS, request.days),
        (Mode::Vip, _) => vip_sources(request.days),
    };
    debug!(mode = %request.mode, days = request.days, count = sources.len(), "Built sources");
    sources
}

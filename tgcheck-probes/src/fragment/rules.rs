//! Classification rules for Fragment username pages.
//!
//! Fragment's markup is undocumented, so the page is classified by an
//! ordered table of marker rules; the first matching rule wins. New markers
//! are added as table entries.

use regex::Regex;
use std::sync::LazyLock;
use tgcheck_core::{Price, ProbeResult, ProbeSource, UsernameQuery, UsernameStatus};
use tracing::debug;

// ============================================================================
// Patterns
// ============================================================================

/// Name-cell marker present on listing pages.
const NAME_CELL_MARKER: &str = "tm-table-cell tm-col-name";

static AVAILABLE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bavailable\b").expect("Invalid regex"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("Invalid regex"));

/// Price patterns, tried in order. The fractional part is matched but not
/// captured, so `1,250.75 TON` yields `1,250`.
static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d[\d,]*)(?:\.\d+)?\s*<small>\s*TON\s*</small>",
        r"(?i)(\d[\d,]*)(?:\.\d+)?\s*TON\b",
        r#"class="[^"]*\btm-value\b[^"]*"[^>]*>\s*(\d[\d,]*)"#,
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid regex"))
    .collect()
});

const SOLD_MARKERS: &[&str] = &["Sold", "Auction closed", "unavailable"];

const ABSENT_MARKERS: &[&str] = &["doesn't exist", "does not exist", "not exist", "not found"];

// ============================================================================
// Page View
// ============================================================================

/// A fetched page plus the precomputed views rules look at.
pub struct PageView<'a> {
    /// Raw HTML.
    pub html: &'a str,
    /// Lowercased HTML.
    pub lower: String,
    /// The username being checked.
    pub query: &'a UsernameQuery,
}

impl<'a> PageView<'a> {
    /// Creates a view over `html`.
    pub fn new(html: &'a str, query: &'a UsernameQuery) -> Self {
        Self {
            html,
            lower: html.to_lowercase(),
            query,
        }
    }
}

// ============================================================================
// Rule Table
// ============================================================================

/// One classification rule.
pub struct PageRule {
    /// Rule name, logged when it matches.
    pub name: &'static str,
    /// Whether the rule applies.
    pub matches: fn(&PageView<'_>) -> bool,
    /// The result when it applies.
    pub verdict: fn(&PageView<'_>) -> ProbeResult,
}

/// Username page rules, in evaluation order.
pub static PAGE_RULES: &[PageRule] = &[
    PageRule {
        name: "available",
        matches: is_available,
        verdict: available_verdict,
    },
    PageRule {
        name: "sold",
        matches: is_sold,
        verdict: sold_verdict,
    },
    PageRule {
        name: "absent",
        matches: is_absent,
        verdict: absent_verdict,
    },
    PageRule {
        name: "telegram_link",
        matches: has_telegram_link,
        verdict: telegram_link_verdict,
    },
];

/// Classifies a username page.
///
/// When no rule matches the result is `unknown`, carrying a title hint if
/// the `<title>` suggests a status.
pub fn classify_page(html: &str, query: &UsernameQuery) -> ProbeResult {
    let page = PageView::new(html, query);

    if let Some(rule) = PAGE_RULES.iter().find(|rule| (rule.matches)(&page)) {
        debug!(rule = rule.name, "Fragment page rule matched");
        return (rule.verdict)(&page);
    }

    let hint = title_hint(html);
    debug!(hint = ?hint, "No Fragment page rule matched");
    ProbeResult::unknown(ProbeSource::Fragment, "No recognizable markers on Fragment page")
        .with_title_hint(hint)
}

// ============================================================================
// Predicates & Verdicts
// ============================================================================

fn is_available(page: &PageView<'_>) -> bool {
    page.html.contains(NAME_CELL_MARKER)
        && (page.html.contains("Available") || AVAILABLE_WORD_RE.is_match(page.html))
}

fn available_verdict(page: &PageView<'_>) -> ProbeResult {
    let can_claim = page.lower.contains("buy now");
    let message = if can_claim {
        "Buy it now on Fragment"
    } else {
        "Available on Fragment marketplace"
    };

    ProbeResult::new(UsernameStatus::AvailableOnFragment, ProbeSource::Fragment, message)
        .with_price(extract_price(page.html))
        .with_can_claim(can_claim)
}

fn is_sold(page: &PageView<'_>) -> bool {
    SOLD_MARKERS.iter().any(|marker| page.html.contains(marker))
}

fn sold_verdict(page: &PageView<'_>) -> ProbeResult {
    ProbeResult::new(UsernameStatus::SoldOnFragment, ProbeSource::Fragment, "Sold on Fragment")
        .with_price(extract_price(page.html))
}

fn is_absent(page: &PageView<'_>) -> bool {
    ABSENT_MARKERS.iter().any(|marker| page.lower.contains(marker))
}

fn absent_verdict(_page: &PageView<'_>) -> ProbeResult {
    ProbeResult::new(
        UsernameStatus::NotOnFragment,
        ProbeSource::Fragment,
        "Username not listed on Fragment",
    )
}

fn has_telegram_link(page: &PageView<'_>) -> bool {
    let needle = format!("t.me/{}", page.query.as_str());

    page.lower.match_indices(&needle).any(|(start, _)| {
        page.lower[start + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '_'))
    })
}

fn telegram_link_verdict(_page: &PageView<'_>) -> ProbeResult {
    ProbeResult::new(UsernameStatus::Taken, ProbeSource::Telegram, "Username is taken")
}

// ============================================================================
// Extraction Helpers
// ============================================================================

/// Extracts a TON price using the ordered pattern cascade.
pub fn extract_price(html: &str) -> Price {
    PRICE_PATTERNS
        .iter()
        .find_map(|re| re.captures(html).and_then(|caps| caps.get(1)))
        .map_or(Price::Unknown, |m| Price::from_raw(m.as_str()))
}

/// Infers a status from the page `<title>`.
pub fn title_hint(html: &str) -> Option<UsernameStatus> {
    let title = TITLE_RE.captures(html)?.get(1)?.as_str().to_lowercase();

    if AVAILABLE_WORD_RE.is_match(&title) {
        Some(UsernameStatus::AvailableOnFragment)
    } else if title.contains("sold") {
        Some(UsernameStatus::SoldOnFragment)
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

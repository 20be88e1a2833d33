//! Fragment landing page and auction search parsers.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tgcheck_core::{Price, ProbeResult, ProbeSource, UsernameQuery, UsernameStatus};
use tracing::{debug, warn};

// ============================================================================
// Patterns
// ============================================================================

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("Invalid selector"));

static NO_ITEMS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".tm-no-items").expect("Invalid selector"));

static VALUE_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".table-cell-value.tm-value").expect("Invalid selector"));

/// API hash embedded in the landing page's `apiUrl`.
static API_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hash=([0-9a-fA-F]+)").expect("Invalid regex"));

/// Marker text shown when the search has no rows.
const NO_RESULTS_TEXT: &str = "no usernames found";

// ============================================================================
// Landing Page
// ============================================================================

/// Extracts the API hash from the Fragment landing page.
///
/// Only `<script>` blocks that mention `apiUrl` are considered.
pub fn extract_api_hash(landing_html: &str) -> Option<String> {
    let document = Html::parse_document(landing_html);

    document
        .select(&SCRIPT_SELECTOR)
        .map(|script| script.text().collect::<String>())
        .filter(|text| text.contains("apiUrl"))
        .find_map(|text| {
            API_HASH_RE
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}

// ============================================================================
// Search Results
// ============================================================================

/// Classifies the HTML fragment returned by the auction search API.
///
/// The first three value cells are, in order, the username tag, the price
/// and the raw status.
pub fn parse_search_results(fragment_html: &str, query: &UsernameQuery) -> ProbeResult {
    if fragment_html.to_lowercase().contains(NO_RESULTS_TEXT) {
        return not_listed();
    }

    let document = Html::parse_fragment(fragment_html);
    if document.select(&NO_ITEMS_SELECTOR).next().is_some() {
        return not_listed();
    }

    let cells: Vec<String> = document
        .select(&VALUE_CELL_SELECTOR)
        .take(3)
        .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
        .collect();

    let [name, price, raw_status] = cells.as_slice() else {
        warn!(cells = cells.len(), "Unexpected Fragment search layout");
        return ProbeResult::unknown(ProbeSource::Fragment, "Unexpected Fragment search layout");
    };

    let listed = name.trim_start_matches('@');
    if !listed.eq_ignore_ascii_case(query.as_str()) {
        debug!(listed, "First search row is a different username");
        return ProbeResult::unknown(ProbeSource::Fragment, "Username not in Fragment search results");
    }

    debug!(raw_status = %raw_status, price = %price, "Fragment search row");

    match raw_status.to_ascii_lowercase().as_str() {
        "available" => ProbeResult::new(
            UsernameStatus::AvailableOnFragment,
            ProbeSource::Fragment,
            "Buy it now on Fragment",
        )
        .with_price(Price::from_raw(price))
        .with_can_claim(true),
        "unavailable" => ProbeResult::new(
            UsernameStatus::SoldOnFragment,
            ProbeSource::Fragment,
            "Not for sale on Fragment",
        ),
        "" => ProbeResult::unknown(ProbeSource::Fragment, "Fragment search row has no status"),
        _ => ProbeResult::new(
            UsernameStatus::Other(raw_status.clone()),
            ProbeSource::Fragment,
            format!("Fragment status: {raw_status}"),
        )
        .with_price(Price::from_raw(price)),
    }
}

fn not_listed() -> ProbeResult {
    ProbeResult::new(
        UsernameStatus::NotOnFragment,
        ProbeSource::Fragment,
        "Username not listed on Fragment",
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn query(name: &str) -> UsernameQuery {
        UsernameQuery::parse(name).unwrap()
    }

    fn row(name: &str, price: &str, status: &str) -> String {
        format!(
            r#"<table><tr class="tm-row-selectable">
                <td><div class="table-cell-value tm-value">{name}</div></td>
                <td><div class="table-cell-value tm-value icon-before icon-ton">{price}</div></td>
                <td><div class="table-cell-value tm-value">{status}</div></td>
            </tr></table>"#
        )
    }

    #[test]
    fn test_extract_api_hash() {
        let html = r#"<html><head>
            <script src="/js/vendor.js"></script>
            <script>var x = "hash=ffff";</script>
            <script>ajInit({"version":1,"apiUrl":"\/api?hash=3f9a0c21be","unauth":true});</script>
        </head><body></body></html>"#;

        assert_eq!(extract_api_hash(html).as_deref(), Some("3f9a0c21be"));
    }

    #[test]
    fn test_extract_api_hash_missing() {
        let html = "<html><script>ajInit({\"apiUrl\":\"/api\"});</script></html>";
        assert_eq!(extract_api_hash(html), None);
        assert_eq!(extract_api_hash(""), None);
    }

    #[test]
    fn test_no_items_marker() {
        let html = r#"<div class="tm-no-items">Nothing here</div>"#;
        let result = parse_search_results(html, &query("nobody"));
        assert_eq!(result.status, UsernameStatus::NotOnFragment);
        assert_eq!(result.price, Price::NotApplicable);
    }

    #[test]
    fn test_no_usernames_found_text() {
        let result = parse_search_results("<p>No usernames found</p>", &query("nobody"));
        assert_eq!(result.status, UsernameStatus::NotOnFragment);
    }

    #[test]
    fn test_available_row() {
        let html = row("@tobi", "5,050", "Available");
        let result = parse_search_results(&html, &query("tobi"));

        assert_eq!(result.status, UsernameStatus::AvailableOnFragment);
        assert!(result.can_claim);
        assert_eq!(result.price.to_string(), "5,050 Ton");
    }

    #[test]
    fn test_unavailable_row() {
        let html = row("@obito", "3,448", "Unavailable");
        let result = parse_search_results(&html, &query("obito"));

        assert_eq!(result.status, UsernameStatus::SoldOnFragment);
        assert!(!result.can_claim);
        assert_eq!(result.price, Price::NotApplicable);
        assert_eq!(result.message, "Not for sale on Fragment");
    }

    #[test]
    fn test_other_raw_status_passes_through() {
        let html = row("@someone", "120", "On auction");
        let result = parse_search_results(&html, &query("someone"));

        assert_eq!(result.status, UsernameStatus::Other("On auction".to_string()));
        assert!(!result.is_determinate());
    }

    #[test]
    fn test_different_username_is_unknown() {
        let html = row("@tobias", "10", "Available");
        let result = parse_search_results(&html, &query("tobi"));
        assert_eq!(result.status, UsernameStatus::Unknown);
    }

    #[test]
    fn test_too_few_cells_is_unknown() {
        let html = r#"<div class="table-cell-value tm-value">@tobi</div>"#;
        let result = parse_search_results(html, &query("tobi"));
        assert_eq!(result.status, UsernameStatus::Unknown);
    }

    #[test]
    fn test_blank_status_cell_is_unknown() {
        for blank in ["", "   \n  "] {
            let html = row("@someone", "1,000", blank);
            let result = parse_search_results(&html, &query("someone"));

            assert_eq!(result.status, UsernameStatus::Unknown);
            assert_eq!(result.message, "Fragment search row has no status");
        }
    }
}

//! Probe outcomes and the canonical response.
//!
//! - [`ProbeResult`] - What a single probe concluded
//! - [`ResolvedStatus`] - The response body returned to callers

use serde::{Deserialize, Serialize};

use super::price::Price;
use super::status::{ProbeSource, UsernameStatus};
use super::username::UsernameQuery;

// ============================================================================
// Probe Result
// ============================================================================

/// The outcome of one probe attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Classification.
    pub status: UsernameStatus,
    /// Listing price, when the probe knows one.
    pub price: Price,
    /// True only when Fragment shows a direct purchase action.
    pub can_claim: bool,
    /// Human-readable explanation.
    pub message: String,
    /// Upstream the classification is attributed to.
    pub source: ProbeSource,
    /// Status inferred from the page `<title>`, used only as a last resort.
    #[serde(skip)]
    pub title_hint: Option<UsernameStatus>,
}

impl ProbeResult {
    /// Creates a result with no price and no purchase action.
    pub fn new(status: UsernameStatus, source: ProbeSource, message: impl Into<String>) -> Self {
        Self {
            status,
            price: Price::NotApplicable,
            can_claim: false,
            message: message.into(),
            source,
            title_hint: None,
        }
    }

    /// Creates an `unknown` result.
    pub fn unknown(source: ProbeSource, message: impl Into<String>) -> Self {
        let mut result = Self::new(UsernameStatus::Unknown, source, message);
        result.price = Price::Unknown;
        result
    }

    /// Creates an `error` result.
    pub fn error(source: ProbeSource, message: impl Into<String>) -> Self {
        let mut result = Self::new(UsernameStatus::Error, source, message);
        result.price = Price::Unknown;
        result
    }

    /// Sets the price.
    pub fn with_price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }

    /// Sets the purchase flag.
    pub fn with_can_claim(mut self, can_claim: bool) -> Self {
        self.can_claim = can_claim;
        self
    }

    /// Sets the title hint.
    pub fn with_title_hint(mut self, hint: Option<UsernameStatus>) -> Self {
        self.title_hint = hint;
        self
    }

    /// Returns true if the classification needs no fallback.
    pub fn is_determinate(&self) -> bool {
        self.status.is_determinate()
    }
}

// ============================================================================
// Resolved Status
// ============================================================================

/// The canonical response for one username.
///
/// Serializes to exactly `username`, `status`, `price`, `can_claim`,
/// `message` and `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStatus {
    /// `@` followed by the normalized name.
    pub username: String,
    /// Classification.
    pub status: UsernameStatus,
    /// Rendered price.
    pub price: Price,
    /// Whether a direct purchase is possible.
    pub can_claim: bool,
    /// Human-readable explanation.
    pub message: String,
    /// Upstream the classification is attributed to.
    pub source: ProbeSource,
}

impl ResolvedStatus {
    /// Builds the response from a query and the final probe result.
    ///
    /// `can_claim` is cleared for every status other than
    /// `available_on_fragment`.
    pub fn from_probe(query: &UsernameQuery, result: ProbeResult) -> Self {
        let can_claim = result.can_claim && result.status == UsernameStatus::AvailableOnFragment;
        Self {
            username: query.handle(),
            status: result.status,
            price: result.price,
            can_claim,
            message: result.message,
            source: result.source,
        }
    }

    /// Returns true if the classification is a final answer.
    pub fn is_determinate(&self) -> bool {
        self.status.is_determinate()
    }
}

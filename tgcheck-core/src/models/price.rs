//! Price rendering.
//!
//! Prices are opaque display strings on the wire: `"5,050 Ton"`,
//! `"Unknown Ton"` or `"N/A"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for a listing whose price could not be extracted.
pub const UNKNOWN_PRICE: &str = "Unknown Ton";

/// Sentinel for results where a price is meaningless.
pub const NOT_APPLICABLE_PRICE: &str = "N/A";

/// A Fragment price in TON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Price {
    /// An amount made of digits and thousands separators, e.g. `5,050`.
    Ton(String),
    /// A price should exist but was not found.
    #[default]
    Unknown,
    /// No price applies (not listed, or classification came from Telegram).
    NotApplicable,
}

impl Price {
    /// Builds a price from raw page text such as `"5,050"` or `" 3,448 TON"`.
    ///
    /// Takes the first run of digits and commas; text without a digit is
    /// [`Price::Unknown`].
    pub fn from_raw(raw: &str) -> Self {
        let Some(start) = raw.find(|c: char| c.is_ascii_digit()) else {
            return Self::Unknown;
        };
        let amount: String = raw[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .collect();

        Self::Ton(amount.trim_end_matches(',').to_string())
    }

    /// Returns true if an amount was extracted.
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Ton(_))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ton(amount) => write!(f, "{amount} Ton"),
            Self::Unknown => f.write_str(UNKNOWN_PRICE),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE_PRICE),
        }
    }
}

impl From<String> for Price {
    fn from(value: String) -> Self {
        match value.as_str() {
            NOT_APPLICABLE_PRICE => Self::NotApplicable,
            UNKNOWN_PRICE => Self::Unknown,
            other => Self::from_raw(other),
        }
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}

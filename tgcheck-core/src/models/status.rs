//! Classification and attribution types.
//!
//! - [`UsernameStatus`] - Closed set of classification tags
//! - [`ProbeSource`] - Which upstream produced the classification

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Username Status
// ============================================================================

/// Classification of a username.
///
/// Serialized as a snake_case string. [`UsernameStatus::Other`] carries a raw
/// Fragment status verbatim and serializes as that string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UsernameStatus {
    /// Listed for sale on Fragment.
    AvailableOnFragment,
    /// Known to Fragment but not for sale (sold, or held outside Fragment).
    SoldOnFragment,
    /// Fragment has no record of the username.
    NotOnFragment,
    /// Registered on Telegram.
    Taken,
    /// Fragment answered HTTP 404 for the username page.
    NotFound,
    /// Free to register on Telegram.
    Available,
    /// No probe produced a classification.
    Unknown,
    /// A probe failed (timeout, transport or upstream error).
    Error,
    /// Unrecognized raw status text reported by Fragment.
    Other(String),
}

impl UsernameStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AvailableOnFragment => "available_on_fragment",
            Self::SoldOnFragment => "sold_on_fragment",
            Self::NotOnFragment => "not_on_fragment",
            Self::Taken => "taken",
            Self::NotFound => "not_found",
            Self::Available => "available",
            Self::Unknown => "unknown",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }

    /// Returns true if this is a final answer that needs no fallback.
    pub fn is_determinate(&self) -> bool {
        matches!(
            self,
            Self::AvailableOnFragment
                | Self::SoldOnFragment
                | Self::NotOnFragment
                | Self::Taken
                | Self::NotFound
                | Self::Available
        )
    }

    /// Returns true if a probe failed outright.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::AvailableOnFragment => "For sale on Fragment",
            Self::SoldOnFragment => "Sold on Fragment",
            Self::NotOnFragment => "Not on Fragment",
            Self::Taken => "Taken",
            Self::NotFound => "Not found",
            Self::Available => "Available",
            Self::Unknown => "Unknown",
            Self::Error => "Error",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for UsernameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for UsernameStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "available_on_fragment" => Self::AvailableOnFragment,
            "sold_on_fragment" => Self::SoldOnFragment,
            "not_on_fragment" => Self::NotOnFragment,
            "taken" => Self::Taken,
            "not_found" => Self::NotFound,
            "available" => Self::Available,
            "unknown" => Self::Unknown,
            "error" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<UsernameStatus> for String {
    fn from(value: UsernameStatus) -> Self {
        match value {
            UsernameStatus::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

// ============================================================================
// Probe Source
// ============================================================================

/// The upstream that produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProbeSource {
    /// fragment.com (auction API or username page).
    #[default]
    Fragment,
    /// t.me redirect behavior.
    Telegram,
}

impl ProbeSource {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Telegram => "telegram",
        }
    }
}

impl fmt::Display for ProbeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinate_set() {
        assert!(UsernameStatus::AvailableOnFragment.is_determinate());
        assert!(UsernameStatus::SoldOnFragment.is_determinate());
        assert!(UsernameStatus::NotOnFragment.is_determinate());
        assert!(UsernameStatus::Taken.is_determinate());
        assert!(UsernameStatus::NotFound.is_determinate());
        assert!(UsernameStatus::Available.is_determinate());

        assert!(!UsernameStatus::Unknown.is_determinate());
        assert!(!UsernameStatus::Error.is_determinate());
        assert!(!UsernameStatus::Other("On auction".to_string()).is_determinate());
    }

    #[test]
    fn test_other_keeps_raw_text() {
        let status = UsernameStatus::Other("On auction".to_string());
        assert_eq!(status.as_str(), "On auction");
        assert_eq!(String::from(status), "On auction");
    }

    #[test]
    fn test_known_strings_are_not_other() {
        assert_eq!(
            UsernameStatus::from("sold_on_fragment".to_string()),
            UsernameStatus::SoldOnFragment
        );
        assert_eq!(
            UsernameStatus::from("whatever".to_string()),
            UsernameStatus::Other("whatever".to_string())
        );
    }

    #[test]
    fn test_source_display() {
        assert_eq!(ProbeSource::Fragment.to_string(), "fragment");
        assert_eq!(ProbeSource::Telegram.to_string(), "telegram");
    }
}

//! Username normalization.
//!
//! Callers hand the resolver whatever the user typed (`"@Durov "`, `"durov"`,
//! ...). [`UsernameQuery`] is the only way to obtain a name that probes will
//! accept, so every outbound URL is built from a validated value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Default minimum username length (non-empty only).
pub const DEFAULT_MIN_LENGTH: usize = 1;

/// A normalized Telegram username.
///
/// Invariants: non-empty, lowercase, ASCII letters, digits and underscores
/// only, no leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UsernameQuery(String);

impl UsernameQuery {
    /// Normalizes `raw` with the default minimum length.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::parse_with_min_length(raw, DEFAULT_MIN_LENGTH)
    }

    /// Normalizes `raw`, rejecting names shorter than `min_length`.
    ///
    /// Surrounding whitespace is trimmed, one leading `@` is stripped and the
    /// rest is lowercased.
    pub fn parse_with_min_length(raw: &str, min_length: usize) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let stripped = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
        let name = stripped.to_ascii_lowercase();

        if name.is_empty() {
            return Err(CoreError::InvalidInput("Username is required".to_string()));
        }

        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(CoreError::InvalidInput(format!(
                "Invalid character '{bad}' in username: only letters, digits and underscores are allowed"
            )));
        }

        let min_length = min_length.max(1);
        if name.len() < min_length {
            return Err(CoreError::InvalidInput(format!(
                "Username must be at least {min_length} characters long"
            )));
        }

        Ok(Self(name))
    }

    /// Returns the normalized name without `@`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the display handle, `@` followed by the normalized name.
    pub fn handle(&self) -> String {
        format!("@{}", self.0)
    }
}

/// Normalizes a raw username with the default rules.
///
/// Equivalent to `UsernameQuery::parse(raw).map(|q| q.as_str().to_string())`.
pub fn normalize(raw: &str) -> Result<String, CoreError> {
    UsernameQuery::parse(raw).map(String::from)
}

impl fmt::Display for UsernameQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UsernameQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UsernameQuery {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UsernameQuery> for String {
    fn from(value: UsernameQuery) -> Self {
        value.0
    }
}

//! Username probe trait and types.
//!
//! A probe represents one method of classifying a username against an
//! upstream. Fragment has several (auction API, page scraping) that are
//! tried in priority order; Telegram has one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tgcheck_core::{ProbeResult, ProbeSource, UsernameQuery};

use crate::context::ProbeContext;

// ============================================================================
// Probe Kind
// ============================================================================

/// The kind of upstream mechanism a probe uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// Fragment's internal auction search API.
    FragmentApi,
    /// Fragment username page scraping.
    FragmentPage,
    /// Telegram `t.me` redirect inspection.
    TelegramRedirect,
    /// A probe built from other probes.
    Composite,
}

impl ProbeKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FragmentApi => "Fragment API",
            Self::FragmentPage => "Fragment Page",
            Self::TelegramRedirect => "Telegram Redirect",
            Self::Composite => "Composite",
        }
    }

    /// The upstream results of this kind are attributed to by default.
    pub fn source(&self) -> ProbeSource {
        match self {
            Self::TelegramRedirect => ProbeSource::Telegram,
            Self::FragmentApi | Self::FragmentPage | Self::Composite => ProbeSource::Fragment,
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Username Probe Trait
// ============================================================================

/// A method for classifying a username against one upstream.
///
/// Probes never fail: transport and parse problems are folded into an
/// `error` or `unknown` [`ProbeResult`] so callers can decide whether to
/// fall back.
///
/// ## Implementing a Probe
///
/// ```ignore
/// struct PageProbe;
///
/// #[async_trait]
/// impl UsernameProbe for PageProbe {
///     fn id(&self) -> &str {
///         "fragment.page"
///     }
///
///     fn kind(&self) -> ProbeKind {
///         ProbeKind::FragmentPage
///     }
///
///     async fn check(&self, ctx: &ProbeContext, query: &UsernameQuery) -> ProbeResult {
///         // Fetch the page and classify it
///     }
/// }
/// ```
#[async_trait]
pub trait UsernameProbe: Send + Sync {
    /// Unique identifier for this probe (e.g., "fragment.api", "telegram.redirect").
    fn id(&self) -> &str;

    /// The kind of mechanism this probe uses.
    fn kind(&self) -> ProbeKind;

    /// Human-readable name for this probe.
    fn display_name(&self) -> String {
        format!("{} ({})", self.id(), self.kind().display_name())
    }

    /// Classifies `query`.
    async fn check(&self, ctx: &ProbeContext, query: &UsernameQuery) -> ProbeResult;

    /// Whether the next probe should run after this result.
    fn should_fallback(&self, result: &ProbeResult) -> bool {
        !result.is_determinate()
    }

    /// Priority of this probe (higher = try first).
    fn priority(&self) -> u32 {
        match self.kind() {
            ProbeKind::FragmentApi => 100,
            ProbeKind::FragmentPage => 80,
            ProbeKind::Composite => 60,
            ProbeKind::TelegramRedirect => 40,
        }
    }
}

// ============================================================================
// Probe Info
// ============================================================================

/// Information about a probe (for reporting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeInfo {
    /// Probe ID.
    pub id: String,
    /// Probe kind.
    pub kind: ProbeKind,
    /// Priority.
    pub priority: u32,
}

impl ProbeInfo {
    /// Creates probe info from a probe implementation.
    pub fn from_probe(probe: &dyn UsernameProbe) -> Self {
        Self {
            id: probe.id().to_string(),
            kind: probe.kind(),
            priority: probe.priority(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Probe context providing access to host APIs and settings.
//!
//! The context is built once at startup and shared read-only by every
//! request: one HTTP client (and its connection pool) plus immutable
//! [`ProbeSettings`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tgcheck_core::{DEFAULT_MIN_LENGTH, UsernameStatus};
use tracing::debug;

use crate::error::HttpError;
use crate::host::http::{DEFAULT_USER_AGENT, HttpClient};
use crate::retry::RetryPolicy;

/// Default Fragment origin.
pub const DEFAULT_FRAGMENT_URL: &str = "https://fragment.com";

/// Default Telegram origin.
pub const DEFAULT_TELEGRAM_URL: &str = "https://t.me";

// ============================================================================
// Fragment Mode
// ============================================================================

/// Which Fragment strategies to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentMode {
    /// Internal auction API only.
    Api,
    /// Username page scraping only.
    Web,
    /// Auction API, then the username page when the API is inconclusive.
    #[default]
    ApiThenWeb,
}

impl FragmentMode {
    /// Returns true if the auction API strategy runs.
    pub fn uses_api(&self) -> bool {
        matches!(self, Self::Api | Self::ApiThenWeb)
    }

    /// Returns true if the page-scraping strategy runs.
    pub fn uses_web(&self) -> bool {
        matches!(self, Self::Web | Self::ApiThenWeb)
    }
}

impl fmt::Display for FragmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Api => "api",
            Self::Web => "web",
            Self::ApiThenWeb => "api_then_web",
        })
    }
}

impl FromStr for FragmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "api" => Ok(Self::Api),
            "web" => Ok(Self::Web),
            "api_then_web" | "auto" => Ok(Self::ApiThenWeb),
            other => Err(format!(
                "unknown fragment mode '{other}' (expected api, web or api_then_web)"
            )),
        }
    }
}

// ============================================================================
// Fallback Policy
// ============================================================================

/// What to do when Fragment reports `error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Ask Telegram.
    #[default]
    Fallback,
    /// Return Fragment's error as the final answer.
    Stop,
}

/// When the resolver consults Telegram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    /// Behavior when Fragment fails.
    pub on_error: ErrorPolicy,
    /// Determinate Fragment statuses that still get a Telegram answer,
    /// typically `not_on_fragment` and `not_found`.
    pub confirm_with_telegram: Vec<UsernameStatus>,
}

impl FallbackPolicy {
    /// Returns true if a Fragment result with `status` should go to Telegram.
    pub fn wants_telegram(&self, status: &UsernameStatus) -> bool {
        if status.is_error() {
            return self.on_error == ErrorPolicy::Fallback;
        }
        if status.is_determinate() {
            return self.confirm_with_telegram.contains(status);
        }
        true
    }
}

// ============================================================================
// Probe Settings
// ============================================================================

/// Settings shared by all probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Fragment origin, without trailing slash.
    pub fragment_base_url: String,
    /// Telegram origin, without trailing slash.
    pub telegram_base_url: String,
    /// Timeout for each Fragment request in milliseconds.
    pub fragment_timeout_ms: u64,
    /// Timeout for the Telegram HEAD request in milliseconds.
    pub telegram_timeout_ms: u64,
    /// Retry policy for Fragment API hash discovery.
    pub retry: RetryPolicy,
    /// Which Fragment strategies to run.
    pub fragment_mode: FragmentMode,
    /// When to fall back to Telegram.
    pub fallback: FallbackPolicy,
    /// Minimum accepted username length.
    pub min_length: usize,
    /// User agent sent upstream.
    pub user_agent: String,
    /// Restrict outbound requests to these domains.
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            fragment_base_url: DEFAULT_FRAGMENT_URL.to_string(),
            telegram_base_url: DEFAULT_TELEGRAM_URL.to_string(),
            fragment_timeout_ms: 15_000,
            telegram_timeout_ms: 5_000,
            retry: RetryPolicy::default(),
            fragment_mode: FragmentMode::default(),
            fallback: FallbackPolicy::default(),
            min_length: DEFAULT_MIN_LENGTH,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_domains: None,
        }
    }
}

impl ProbeSettings {
    /// Fragment request timeout.
    pub fn fragment_timeout(&self) -> Duration {
        Duration::from_millis(self.fragment_timeout_ms)
    }

    /// Telegram request timeout.
    pub fn telegram_timeout(&self) -> Duration {
        Duration::from_millis(self.telegram_timeout_ms)
    }

    /// Fragment origin with any trailing slash removed.
    pub fn fragment_base(&self) -> &str {
        self.fragment_base_url.trim_end_matches('/')
    }

    /// Telegram origin with any trailing slash removed.
    pub fn telegram_base(&self) -> &str {
        self.telegram_base_url.trim_end_matches('/')
    }

    /// Sets the Fragment origin.
    pub fn with_fragment_url(mut self, url: impl Into<String>) -> Self {
        self.fragment_base_url = url.into();
        self
    }

    /// Sets the Telegram origin.
    pub fn with_telegram_url(mut self, url: impl Into<String>) -> Self {
        self.telegram_base_url = url.into();
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the Fragment mode.
    pub fn with_fragment_mode(mut self, mode: FragmentMode) -> Self {
        self.fragment_mode = mode;
        self
    }

    /// Sets the minimum username length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets both timeouts.
    pub fn with_timeouts(mut self, fragment: Duration, telegram: Duration) -> Self {
        self.fragment_timeout_ms = u64::try_from(fragment.as_millis()).unwrap_or(u64::MAX);
        self.telegram_timeout_ms = u64::try_from(telegram.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }
}

// ============================================================================
// Probe Context
// ============================================================================

/// Context provided to probes: the shared HTTP client and settings.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone)]
pub struct ProbeContext {
    /// HTTP client with tracing.
    pub http: Arc<HttpClient>,
    /// Probe settings.
    pub settings: Arc<ProbeSettings>,
}

impl ProbeContext {
    /// Creates a context with default settings.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_settings(ProbeSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: ProbeSettings) -> Result<Self, HttpError> {
        Self::builder().settings(settings).build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> ProbeContextBuilder {
        ProbeContextBuilder::new()
    }

    /// Returns the settings.
    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }
}

impl fmt::Debug for ProbeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Probe Context Builder
// ============================================================================

/// Builder for constructing a `ProbeContext`.
#[derive(Default)]
pub struct ProbeContextBuilder {
    settings: ProbeSettings,
}

impl ProbeContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probe settings.
    pub fn settings(mut self, settings: ProbeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the context and its HTTP client from the settings.
    pub fn build(self) -> Result<ProbeContext, HttpError> {
        let mut client = HttpClient::with_user_agent(&self.settings.user_agent)?;
        if let Some(domains) = self.settings.allowed_domains.clone() {
            client = client.with_allowed_domains(domains);
        }
        let http = Arc::new(client);

        debug!(
            fragment = %self.settings.fragment_base(),
            telegram = %self.settings.telegram_base(),
            mode = %self.settings.fragment_mode,
            "Probe context ready"
        );

        Ok(ProbeContext {
            http,
            settings: Arc::new(self.settings),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

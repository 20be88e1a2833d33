// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # tgcheck Fetch
//!
//! Probe infrastructure for the tgcheck username checker.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing, browser headers and domain allowlist
//!
//! ## Probe Pipeline
//!
//! - [`probe::UsernameProbe`] - Trait for probe implementations
//! - [`pipeline::ProbePipeline`] - Executes probes in priority order
//! - [`context::ProbeContext`] - Shared HTTP client and settings
//! - [`retry::RetryPolicy`] - Bounded retries for flaky upstream calls
//!
//! ## Resolution
//!
//! [`resolver::StatusResolver`] runs the Fragment probe, falls back to the
//! Telegram probe when Fragment is inconclusive, and builds the final
//! [`tgcheck_core::ResolvedStatus`].
//!
//! ## Example
//!
//! ```ignore
//! use tgcheck_fetch::{ProbeContext, StatusResolver};
//!
//! let ctx = ProbeContext::new()?;
//! let resolver = StatusResolver::new(fragment_probe, telegram_probe, ctx);
//!
//! let status = resolver.resolve("@durov").await?;
//! ```

pub mod context;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod probe;
pub mod resolver;
pub mod retry;

// Errors
pub use error::{FetchError, HttpError};

// Host APIs
pub use host::http::{DEFAULT_USER_AGENT, HttpClient};

// Probes & Pipeline
pub use context::{
    DEFAULT_FRAGMENT_URL, DEFAULT_TELEGRAM_URL, ErrorPolicy, FallbackPolicy, FragmentMode,
    ProbeContext, ProbeContextBuilder, ProbeSettings,
};
pub use pipeline::{ProbeAttempt, ProbeOutcome, ProbePipeline};
pub use probe::{ProbeInfo, ProbeKind, UsernameProbe};
pub use resolver::{StatusResolver, TITLE_HINT_MESSAGE, UNDETERMINED_MESSAGE};
pub use retry::RetryPolicy;

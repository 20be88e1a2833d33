// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # tgcheck Core
//!
//! Core types for the `tgcheck` username checker.
//!
//! This crate has no I/O. It defines the values that flow between the
//! probes, the resolver and the HTTP front end:
//!
//! - [`UsernameQuery`] - A validated, normalized username
//! - [`UsernameStatus`] - Closed set of classification tags
//! - [`ProbeSource`] - Which upstream produced a classification
//! - [`Price`] - Rendered TON price or sentinel
//! - [`ProbeResult`] - Outcome of one probe
//! - [`ResolvedStatus`] - The canonical response body
//! - [`CoreError`] - Input validation errors

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    DEFAULT_MIN_LENGTH, NOT_APPLICABLE_PRICE, Price, ProbeResult, ProbeSource, ResolvedStatus,
    UNKNOWN_PRICE, UsernameQuery, UsernameStatus, normalize,
};

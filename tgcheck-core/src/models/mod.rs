//! Domain models for tgcheck.
//!
//! ## Submodules
//!
//! - [`username`] - Username normalization (UsernameQuery)
//! - [`status`] - Classification tags (UsernameStatus, ProbeSource)
//! - [`price`] - Price rendering (Price)
//! - [`result`] - Probe outcomes (ProbeResult, ResolvedStatus)

pub mod price;
pub mod result;
pub mod status;
pub mod username;

// Re-export everything at the models level
pub use price::{NOT_APPLICABLE_PRICE, Price, UNKNOWN_PRICE};
pub use result::{ProbeResult, ResolvedStatus};
pub use status::{ProbeSource, UsernameStatus};
pub use username::{DEFAULT_MIN_LENGTH, UsernameQuery, normalize};
#[cfg(test)]
mod serde_tests;

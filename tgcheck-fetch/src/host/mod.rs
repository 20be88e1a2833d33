//! Host APIs for tgcheck probes.
//!
//! - [`http`] - HTTP client with tracing, browser headers and domain allowlist

pub mod http;

pub use http::HttpClient;

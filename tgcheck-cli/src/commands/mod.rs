//! CLI command implementations.

pub mod check;
pub mod config;
pub mod probes;
pub mod serve;

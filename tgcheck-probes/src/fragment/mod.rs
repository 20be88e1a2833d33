//! Fragment marketplace probes.
//!
//! Two strategies: the internal auction search API (primary) and scraping
//! of the public username page (fallback).

mod api;
pub(crate) mod parser;
mod probe;
pub(crate) mod rules;
mod web;

pub use api::FragmentApiProbe;
pub use probe::FragmentProbe;
pub use rules::{PAGE_RULES, PageRule, classify_page, extract_price};
pub use web::FragmentWebProbe;

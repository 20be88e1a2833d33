// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # tgcheck Probes
//!
//! Upstream-specific probe implementations for tgcheck.
//!
//! | Probe | Upstream | Mechanism | Priority |
//! |-------|----------|-----------|----------|
//! | `fragment.api` | Fragment | Auction search API (hash from landing page) | 100 |
//! | `fragment.page` | Fragment | Username page rule table | 80 |
//! | `telegram.redirect` | Telegram | HEAD `t.me/<name>`, inspect final URL | 40 |
//!
//! The two Fragment strategies run inside [`FragmentProbe`]; the resolver
//! consults [`TelegramProbe`] only when Fragment is inconclusive.
//!
//! ## Usage
//!
//! ```ignore
//! use tgcheck_fetch::ProbeContext;
//! use tgcheck_probes::build_resolver;
//!
//! let resolver = build_resolver(ProbeContext::new()?);
//! let status = resolver.resolve("@durov").await?;
//! ```

pub mod fragment;
pub mod registry;
pub mod telegram;

pub use fragment::{FragmentApiProbe, FragmentProbe, FragmentWebProbe};
pub use registry::{ProbeRegistry, build_resolver};
pub use telegram::{TelegramProbe, classify_final_url};

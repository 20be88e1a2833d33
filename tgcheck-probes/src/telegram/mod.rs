//! Telegram `t.me` redirect probe.

mod probe;

pub use probe::{TelegramProbe, classify_final_url};

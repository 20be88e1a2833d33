//! Telegram probe.
//!
//! `t.me/<name>` for an unclaimed name redirects to an invite-style `+` URL;
//! a claimed name resolves to its own page. Only the terminal URL of the
//! redirect chain is inspected.

use async_trait::async_trait;
use tgcheck_core::{ProbeResult, ProbeSource, UsernameQuery, UsernameStatus};
use tgcheck_fetch::{HttpError, ProbeContext, ProbeKind, UsernameProbe};
use tracing::{debug, instrument, warn};
use url::Url;

/// Probe that follows the `t.me` redirect chain with a HEAD request.
#[derive(Debug, Default)]
pub struct TelegramProbe;

impl TelegramProbe {
    /// Creates a new Telegram probe.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsernameProbe for TelegramProbe {
    fn id(&self) -> &str {
        "telegram.redirect"
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::TelegramRedirect
    }

    #[instrument(skip(self, ctx), fields(username = %query))]
    async fn check(&self, ctx: &ProbeContext, query: &UsernameQuery) -> ProbeResult {
        let url = format!("{}/{query}", ctx.settings.telegram_base());

        match ctx
            .http
            .head_final_url(&url, ctx.settings.telegram_timeout())
            .await
        {
            Ok((final_url, status)) => {
                debug!(final_url = %final_url, status = %status, "Telegram redirect resolved");
                classify_final_url(&final_url)
            }
            Err(HttpError::Timeout) => {
                warn!("Telegram request timed out");
                ProbeResult::error(self.kind().source(), "Request timeout")
            }
            Err(error) => {
                warn!(error = %error, "Telegram request failed");
                ProbeResult::error(
                    self.kind().source(),
                    format!("Telegram check failed: {error}"),
                )
            }
        }
    }
}

/// Classifies the terminal URL of the `t.me` redirect chain.
pub fn classify_final_url(url: &Url) -> ProbeResult {
    let raw = url.as_str();

    if raw.contains("t.me/+") || raw.contains("+http") || url.path().starts_with("/+") {
        ProbeResult::new(UsernameStatus::Available, ProbeSource::Telegram, "Available on Telegram")
    } else {
        ProbeResult::new(UsernameStatus::Taken, ProbeSource::Telegram, "Username is taken")
    }
}

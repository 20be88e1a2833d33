//! Fragment username page probe.

use async_trait::async_trait;
use reqwest::StatusCode;
use tgcheck_core::{ProbeResult, UsernameQuery, UsernameStatus};
use tgcheck_fetch::{HttpError, ProbeContext, ProbeKind, UsernameProbe};
use tracing::{debug, instrument, warn};

use super::rules::classify_page;

/// Probe that scrapes `fragment.com/username/<name>`.
#[derive(Debug, Default)]
pub struct FragmentWebProbe;

impl FragmentWebProbe {
    /// Creates a new page probe.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsernameProbe for FragmentWebProbe {
    fn id(&self) -> &str {
        "fragment.page"
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::FragmentPage
    }

    #[instrument(skip(self, ctx), fields(username = %query))]
    async fn check(&self, ctx: &ProbeContext, query: &UsernameQuery) -> ProbeResult {
        let url = format!("{}/username/{query}", ctx.settings.fragment_base());
        let source = self.kind().source();

        let (status, body) = match ctx.http.get_text(&url, ctx.settings.fragment_timeout()).await {
            Ok(response) => response,
            Err(HttpError::Timeout) => {
                warn!("Fragment page request timed out");
                return ProbeResult::error(source, "Request timeout");
            }
            Err(error) => {
                warn!(error = %error, "Fragment page request failed");
                return ProbeResult::error(source, format!("Error: {error}"));
            }
        };

        debug!(status = %status, bytes = body.len(), "Fragment page loaded");

        if status == StatusCode::NOT_FOUND {
            return ProbeResult::new(
                UsernameStatus::NotFound,
                source,
                "Username not found on Fragment",
            );
        }

        if !status.is_success() {
            return ProbeResult::error(
                source,
                format!("Fragment returned HTTP {}", status.as_u16()),
            );
        }

        classify_page(&body, query)
    }
}

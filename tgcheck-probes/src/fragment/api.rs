//! Fragment auction search API probe.
//!
//! The API is internal: the landing page embeds a per-session hash in its
//! bootstrap script, and search requests must carry it.

use async_trait::async_trait;
use serde::Deserialize;
use tgcheck_core::{ProbeResult, UsernameQuery};
use tgcheck_fetch::{FetchError, ProbeContext, ProbeKind, UsernameProbe};
use tracing::{debug, instrument, warn};

use super::parser::{extract_api_hash, parse_search_results};

/// Reply from the auction search API.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Rendered result rows.
    #[serde(default)]
    html: Option<String>,
    /// Error text, when the API rejects the request.
    #[serde(default)]
    error: Option<String>,
}

/// Probe that queries Fragment's internal auction search.
#[derive(Debug, Default)]
pub struct FragmentApiProbe;

impl FragmentApiProbe {
    /// Creates a new API probe.
    pub fn new() -> Self {
        Self
    }

    /// Loads the landing page and extracts the API hash, under the retry policy.
    async fn discover_hash(&self, ctx: &ProbeContext) -> Result<String, FetchError> {
        let url = format!("{}/", ctx.settings.fragment_base());
        let timeout = ctx.settings.fragment_timeout();

        ctx.settings
            .retry
            .run("fragment.hash", |attempt| {
                let url = url.clone();
                async move {
                    debug!(attempt, "Loading Fragment landing page");
                    let (status, body) = ctx.http.get_text(&url, timeout).await?;
                    if !status.is_success() {
                        return Err(FetchError::UpstreamStatus(status.as_u16()));
                    }
                    extract_api_hash(&body).ok_or(FetchError::HashNotFound)
                }
            })
            .await
    }

    /// Runs the auction search and returns the result HTML.
    async fn search(
        &self,
        ctx: &ProbeContext,
        hash: &str,
        query: &UsernameQuery,
    ) -> Result<String, FetchError> {
        let url = format!("{}/api?hash={hash}", ctx.settings.fragment_base());
        let form = [
            ("type", "usernames"),
            ("query", query.as_str()),
            ("method", "searchAuctions"),
        ];

        let response = ctx
            .http
            .post_form(&url, &form, ctx.settings.fragment_timeout())
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let reply: SearchResponse = serde_json::from_str(&body)?;

        match (reply.html, reply.error) {
            (Some(html), _) => Ok(html),
            (None, Some(error)) => Err(FetchError::InvalidResponse(error)),
            (None, None) => Err(FetchError::InvalidResponse(
                "search reply has no html field".to_string(),
            )),
        }
    }
}

#[async_trait]
impl UsernameProbe for FragmentApiProbe {
    fn id(&self) -> &str {
        "fragment.api"
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::FragmentApi
    }

    #[instrument(skip(self, ctx), fields(username = %query))]
    async fn check(&self, ctx: &ProbeContext, query: &UsernameQuery) -> ProbeResult {
        let hash = match self.discover_hash(ctx).await {
            Ok(hash) => hash,
            Err(FetchError::HashNotFound) => {
                warn!("Fragment landing page carried no API hash");
                return ProbeResult::unknown(self.kind().source(), "Fragment API hash not found");
            }
            Err(error) => return self.failure(&error),
        };

        match self.search(ctx, &hash, query).await {
            Ok(html) => parse_search_results(&html, query),
            Err(error) => self.failure(&error),
        }
    }
}

impl FragmentApiProbe {
    /// Folds a request failure into an `error` result.
    ///
    /// A single timed-out request reads "Request timeout", like the page and
    /// Telegram probes; an exhausted retry budget reports the attempt count.
    fn failure(&self, error: &FetchError) -> ProbeResult {
        warn!(error = %error, timeout = error.is_timeout(), "Fragment API request failed");

        let message = match error {
            FetchError::RetriesExhausted { attempts, source } => {
                format!("Fragment request failed after {attempts} attempts: {source}")
            }
            other if other.is_timeout() => "Request timeout".to_string(),
            other => format!("Fragment request failed: {other}"),
        };
        ProbeResult::error(self.kind().source(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgcheck_core::ProbeSource;
    use tgcheck_fetch::HttpError;

    #[test]
    fn test_failure_message_reports_attempts() {
        let error = FetchError::RetriesExhausted {
            attempts: 3,
            source: Box::new(FetchError::Http(HttpError::Timeout)),
        };
        let result = FragmentApiProbe.failure(&error);

        assert_eq!(
            result.message,
            "Fragment request failed after 3 attempts: Request timeout"
        );
        assert!(result.status.is_error());
        assert_eq!(result.source, ProbeSource::Fragment);
    }

    #[test]
    fn test_single_timeout_message() {
        let result = FragmentApiProbe.failure(&FetchError::Http(HttpError::Timeout));
        assert_eq!(result.message, "Request timeout");
        assert!(result.status.is_error());
    }

    #[test]
    fn test_upstream_status_message() {
        let result = FragmentApiProbe.failure(&FetchError::UpstreamStatus(502));
        assert_eq!(result.message, "Fragment request failed: Upstream returned HTTP 502");
    }

    #[test]
    fn test_search_response_shape() {
        let reply: SearchResponse =
            serde_json::from_str(r#"{"html":"<div></div>","ok":true}"#).unwrap();
        assert_eq!(reply.html.as_deref(), Some("<div></div>"));
        assert!(reply.error.is_none());
    }
}

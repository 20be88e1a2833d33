//! HTTP client with tracing, browser headers, and domain allowlist.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Browser-like default headers (Fragment serves bots a different page)
//! - Domain allowlist for security
//! - Per-call timeouts
//! - Redirect-following HEAD requests that report the terminal URL

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue},
    redirect::Policy,
};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Browser user agent sent to Fragment and Telegram.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Accept header for HTML pages.
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accept-Language header.
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

/// Maximum redirect hops followed by any request.
const MAX_REDIRECTS: usize = 10;

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper shared by every probe.
///
/// The inner `reqwest::Client` owns the connection pool; cloning this type is
/// cheap and shares the pool. Default headers are fixed at construction.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a client that sends the default browser user agent.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Creates a client with a custom user agent.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(HttpError::Request)?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains (and their subdomains).
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("GET request");

        let response = self.inner.get(url).timeout(timeout).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request and returns the status and body text.
    pub async fn get_text(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<(StatusCode, String), HttpError> {
        let response = self.get(url, timeout).await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Performs a POST request with form data.
    #[instrument(skip(self, form), fields(url = %url))]
    pub async fn post_form<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
        timeout: Duration,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("POST request with form data");

        let response = self
            .inner
            .post(url)
            .form(form)
            .timeout(timeout)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a HEAD request, follows redirects, and returns the terminal URL.
    ///
    /// The body is never read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn head_final_url(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<(Url, StatusCode), HttpError> {
        self.is_domain_allowed(url)?;
        debug!("HEAD request");

        let response = self.inner.head(url).timeout(timeout).send().await?;
        let final_url = response.url().clone();
        debug!(status = %response.status(), final_url = %final_url, "Redirect chain resolved");
        Ok((final_url, response.status()))
    }
}

// ============================================================================
// Tests
// ============================================================================

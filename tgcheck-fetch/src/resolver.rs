//! Username status resolution.
//!
//! The resolver normalizes the input, asks Fragment, and consults Telegram
//! only when Fragment's answer is inconclusive (or when the fallback policy
//! asks for confirmation). Probe failures never escape; the only error is
//! invalid input, raised before any network call.

use std::sync::Arc;
use tgcheck_core::{CoreError, Price, ProbeResult, ResolvedStatus, UsernameQuery, UsernameStatus};
use tracing::{debug, info, instrument};

use crate::context::ProbeContext;
use crate::probe::UsernameProbe;

/// Message used when the final status came from the page title.
pub const TITLE_HINT_MESSAGE: &str = "Classified from page title";

/// Message used when nothing could classify the username.
pub const UNDETERMINED_MESSAGE: &str = "Could not determine status";

/// Resolves raw usernames into [`ResolvedStatus`] values.
///
/// One resolver is shared by every request; it holds no per-request state.
pub struct StatusResolver {
    fragment: Arc<dyn UsernameProbe>,
    telegram: Arc<dyn UsernameProbe>,
    ctx: ProbeContext,
}

impl StatusResolver {
    /// Creates a resolver from a Fragment probe, a Telegram probe and the
    /// shared context.
    pub fn new(
        fragment: Arc<dyn UsernameProbe>,
        telegram: Arc<dyn UsernameProbe>,
        ctx: ProbeContext,
    ) -> Self {
        Self {
            fragment,
            telegram,
            ctx,
        }
    }

    /// Returns the shared context.
    pub fn context(&self) -> &ProbeContext {
        &self.ctx
    }

    /// Normalizes `raw` and resolves it.
    ///
    /// Returns [`CoreError::InvalidInput`] for empty, malformed or too-short
    /// input. No probe runs in that case.
    pub async fn resolve(&self, raw: &str) -> Result<ResolvedStatus, CoreError> {
        let query = UsernameQuery::parse_with_min_length(raw, self.ctx.settings.min_length)?;
        Ok(self.resolve_query(&query).await)
    }

    /// Resolves an already normalized query.
    #[instrument(skip(self), fields(username = %query))]
    pub async fn resolve_query(&self, query: &UsernameQuery) -> ResolvedStatus {
        let fragment = self.fragment.check(&self.ctx, query).await;
        debug!(status = %fragment.status, "Fragment answered");

        let policy = &self.ctx.settings.fallback;
        let result = if policy.wants_telegram(&fragment.status) {
            let telegram = self.telegram.check(&self.ctx, query).await;
            debug!(status = %telegram.status, "Telegram answered");
            merge(fragment, telegram)
        } else {
            fragment
        };

        let resolved = ResolvedStatus::from_probe(query, result);
        info!(
            username = %resolved.username,
            status = %resolved.status,
            source = %resolved.source,
            "Resolved username"
        );
        resolved
    }
}

/// Combines an inconclusive Fragment result with Telegram's answer.
fn merge(fragment: ProbeResult, telegram: ProbeResult) -> ProbeResult {
    if telegram.is_determinate() {
        let price = if fragment.price.is_known() {
            fragment.price
        } else {
            Price::NotApplicable
        };
        return ProbeResult::new(telegram.status, telegram.source, telegram.message)
            .with_price(price);
    }

    if let Some(hint) = fragment.title_hint.clone() {
        return ProbeResult::new(hint, fragment.source, TITLE_HINT_MESSAGE)
            .with_price(fragment.price);
    }

    if fragment.status == UsernameStatus::Unknown {
        let mut fragment = fragment;
        fragment.message = UNDETERMINED_MESSAGE.to_string();
        return fragment;
    }

    fragment
}

// ============================================================================
// Tests
// ============================================================================

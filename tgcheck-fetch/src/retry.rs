//! Bounded retry policy for outbound requests.
//!
//! The policy is a plain value passed into the probe that needs it, so the
//! attempt ceiling and delays can be tested without a network.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::FetchError;

/// Policy for retrying failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first. Never less than 1.
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds.
    pub delay_ms: u64,
    /// Whether to double the delay after each attempt.
    pub exponential_backoff: bool,
    /// Upper bound for any single delay in milliseconds.
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// Creates a policy with a fixed delay between attempts.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Self {
            max_attempts,
            delay_ms,
            exponential_backoff: false,
            max_delay_ms: delay_ms,
        }
    }

    /// Enables or disables exponential backoff.
    pub fn with_exponential_backoff(mut self, enabled: bool, max_delay: Duration) -> Self {
        self.exponential_backoff = enabled;
        self.max_delay_ms = u64::try_from(max_delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Effective attempt ceiling.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Calculates the delay after a failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            let exponent = attempt.saturating_sub(1).min(31);
            self.delay_ms.saturating_mul(2u64.pow(exponent))
        } else {
            self.delay_ms
        };

        Duration::from_millis(delay.min(self.max_delay_ms.max(self.delay_ms)))
    }

    /// Runs `operation` until it succeeds, fails permanently, or the attempt
    /// ceiling is reached.
    ///
    /// The closure receives the 1-based attempt number. Only transient errors
    /// (see [`FetchError::is_transient`]) are retried. Exhausting the budget
    /// yields [`FetchError::RetriesExhausted`] wrapping the last error.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let max_attempts = self.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let error = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !error.is_transient() {
                return Err(error);
            }

            if attempt >= max_attempts {
                warn!(
                    operation = label,
                    attempts = attempt,
                    error = %error,
                    "Retry budget exhausted"
                );
                return Err(FetchError::RetriesExhausted {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            let delay = self.delay_for_attempt(attempt);
            warn!(
                operation = label,
                attempt,
                error = %error,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for RetryPolicy {
    /// Three attempts, two seconds apart.
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(2))
    }
}

//! Probe pipeline for executing probes in order.
//!
//! The pipeline takes a list of probes and executes them in priority order
//! until one produces a result it does not want to fall back from.

use std::time::{Duration, Instant};
use tgcheck_core::{ProbeResult, ProbeSource, UsernameQuery, UsernameStatus};
use tracing::{debug, info, instrument};

use crate::context::ProbeContext;
use crate::probe::{ProbeInfo, ProbeKind, UsernameProbe};

// ============================================================================
// Probe Attempt
// ============================================================================

/// Record of a single probe attempt.
#[derive(Debug, Clone)]
pub struct ProbeAttempt {
    /// The probe ID that was attempted.
    pub probe_id: String,
    /// The kind of probe used.
    pub kind: ProbeKind,
    /// The status the probe reported.
    pub status: UsernameStatus,
    /// How long the attempt took.
    pub duration: Duration,
}

// ============================================================================
// Probe Outcome
// ============================================================================

/// The outcome of a pipeline execution.
#[derive(Debug)]
pub struct ProbeOutcome {
    /// The final result.
    pub result: ProbeResult,
    /// ID of the probe whose result was accepted without fallback.
    pub decided_by: Option<String>,
    /// All attempts made.
    pub attempts: Vec<ProbeAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl ProbeOutcome {
    /// Returns true if some probe produced a final answer.
    pub fn is_decided(&self) -> bool {
        self.decided_by.is_some()
    }

    /// Returns the number of probes that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }
}

// ============================================================================
// Probe Pipeline
// ============================================================================

/// A pipeline of probes tried in order.
///
/// When every probe falls back, the first probe's result is kept, enriched
/// with the first title hint and the first extracted price reported by the
/// later probes.
pub struct ProbePipeline {
    probes: Vec<Box<dyn UsernameProbe>>,
}

impl ProbePipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    /// Creates a pipeline with the given probes.
    pub fn with_probes(probes: Vec<Box<dyn UsernameProbe>>) -> Self {
        let mut pipeline = Self { probes };
        pipeline.sort_by_priority();
        pipeline
    }

    /// Sorts probes by priority (highest first). The sort is stable.
    fn sort_by_priority(&mut self) {
        self.probes.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns information about all probes.
    pub fn probe_info(&self) -> Vec<ProbeInfo> {
        self.probes
            .iter()
            .map(|p| ProbeInfo::from_probe(p.as_ref()))
            .collect()
    }

    /// Execute the pipeline, trying probes in order until one is final.
    #[instrument(skip(self, ctx), fields(username = %query, probes = self.probes.len()))]
    pub async fn execute(&self, ctx: &ProbeContext, query: &UsernameQuery) -> ProbeOutcome {
        let start = Instant::now();
        let mut attempts = Vec::with_capacity(self.probes.len());
        let mut first: Option<ProbeResult> = None;

        for probe in &self.probes {
            let probe_id = probe.id();
            let attempt_start = Instant::now();
            debug!(probe = %probe_id, kind = %probe.kind(), "Executing probe");

            let result = probe.check(ctx, query).await;
            let duration = attempt_start.elapsed();

            attempts.push(ProbeAttempt {
                probe_id: probe_id.to_string(),
                kind: probe.kind(),
                status: result.status.clone(),
                duration,
            });

            if !probe.should_fallback(&result) {
                info!(
                    probe = %probe_id,
                    status = %result.status,
                    duration = ?duration,
                    "Probe produced final result"
                );
                return ProbeOutcome {
                    result,
                    decided_by: Some(probe_id.to_string()),
                    attempts,
                    duration: start.elapsed(),
                };
            }

            debug!(probe = %probe_id, status = %result.status, "Probe inconclusive, falling back");

            match first.as_mut() {
                None => first = Some(result),
                Some(kept) => enrich(kept, result),
            }
        }

        let result = first.unwrap_or_else(|| {
            ProbeResult::unknown(ProbeSource::Fragment, "No probes configured")
        });

        debug!(status = %result.status, "All probes inconclusive");
        ProbeOutcome {
            result,
            decided_by: None,
            attempts,
            duration: start.elapsed(),
        }
    }
}

impl Default for ProbePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the title hint and price from a later inconclusive result into the
/// kept one, without overwriting what the kept one already has.
fn enrich(kept: &mut ProbeResult, later: ProbeResult) {
    if kept.title_hint.is_none() {
        kept.title_hint = later.title_hint;
    }
    if !kept.price.is_known() && later.price.is_known() {
        kept.price = later.price;
    }
}

// ============================================================================
// Tests
// ============================================================================

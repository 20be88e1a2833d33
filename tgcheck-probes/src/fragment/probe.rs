//! Combined Fragment probe.

use async_trait::async_trait;
use tgcheck_core::{ProbeResult, UsernameQuery};
use tgcheck_fetch::{
    FragmentMode, ProbeContext, ProbeInfo, ProbeKind, ProbePipeline, UsernameProbe,
};
use tracing::{debug, instrument};

use super::api::FragmentApiProbe;
use super::web::FragmentWebProbe;

/// Fragment probe that runs the API and page strategies selected by
/// [`FragmentMode`] in priority order.
pub struct FragmentProbe {
    pipeline: ProbePipeline,
}

impl FragmentProbe {
    /// Creates a probe for the given mode.
    pub fn new(mode: FragmentMode) -> Self {
        let mut probes: Vec<Box<dyn UsernameProbe>> = Vec::new();
        if mode.uses_api() {
            probes.push(Box::new(FragmentApiProbe::new()));
        }
        if mode.uses_web() {
            probes.push(Box::new(FragmentWebProbe::new()));
        }

        Self {
            pipeline: ProbePipeline::with_probes(probes),
        }
    }

    /// Returns information about the inner strategies.
    pub fn strategies(&self) -> Vec<ProbeInfo> {
        self.pipeline.probe_info()
    }
}

impl Default for FragmentProbe {
    fn default() -> Self {
        Self::new(FragmentMode::default())
    }
}

#[async_trait]
impl UsernameProbe for FragmentProbe {
    fn id(&self) -> &str {
        "fragment"
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Composite
    }

    #[instrument(skip(self, ctx), fields(username = %query))]
    async fn check(&self, ctx: &ProbeContext, query: &UsernameQuery) -> ProbeResult {
        let outcome = self.pipeline.execute(ctx, query).await;
        debug!(
            attempts = outcome.attempts_count(),
            decided_by = ?outcome.decided_by,
            duration = ?outcome.duration,
            "Fragment probe finished"
        );
        outcome.result
    }
}

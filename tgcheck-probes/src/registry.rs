//! Probe assembly.
//!
//! Builds the Fragment and Telegram probes for a context and wires them into
//! a [`StatusResolver`].

use std::sync::Arc;
use tgcheck_fetch::{ProbeContext, ProbeInfo, StatusResolver, UsernameProbe};

use crate::fragment::FragmentProbe;
use crate::telegram::TelegramProbe;

/// Static access to the probe set.
pub struct ProbeRegistry;

impl ProbeRegistry {
    /// Builds the Fragment probe configured by the context's settings.
    pub fn fragment(ctx: &ProbeContext) -> FragmentProbe {
        FragmentProbe::new(ctx.settings.fragment_mode)
    }

    /// Builds the Telegram probe.
    pub fn telegram() -> TelegramProbe {
        TelegramProbe::new()
    }

    /// Describes every probe that will run for the context's settings, in
    /// execution order.
    pub fn describe(ctx: &ProbeContext) -> Vec<ProbeInfo> {
        let mut info = Self::fragment(ctx).strategies();
        info.push(ProbeInfo::from_probe(&Self::telegram()));
        info
    }
}

/// Builds the default resolver: Fragment first, Telegram as fallback.
pub fn build_resolver(ctx: ProbeContext) -> StatusResolver {
    let fragment: Arc<dyn UsernameProbe> = Arc::new(ProbeRegistry::fragment(&ctx));
    let telegram: Arc<dyn UsernameProbe> = Arc::new(ProbeRegistry::telegram());
    StatusResolver::new(fragment, telegram, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgcheck_fetch::{FragmentMode, ProbeKind, ProbeSettings};

    #[test]
    fn test_describe_lists_execution_order() {
        let ctx = ProbeContext::new().unwrap();
        let ids: Vec<_> = ProbeRegistry::describe(&ctx)
            .into_iter()
            .map(|info| info.id)
            .collect();

        assert_eq!(ids, vec!["fragment.api", "fragment.page", "telegram.redirect"]);
    }

    #[test]
    fn test_describe_respects_mode() {
        let ctx = ProbeContext::with_settings(
            ProbeSettings::default().with_fragment_mode(FragmentMode::Web),
        )
        .unwrap();
        let info = ProbeRegistry::describe(&ctx);

        assert_eq!(info.len(), 2);
        assert_eq!(info[0].kind, ProbeKind::FragmentPage);
        assert_eq!(info[1].kind, ProbeKind::TelegramRedirect);
    }
}

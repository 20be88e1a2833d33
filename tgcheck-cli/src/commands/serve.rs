//! Serve command - run the HTTP API.

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use tgcheck_fetch::ProbeContext;
use tgcheck_probes::{ProbeRegistry, build_resolver};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::Cli;
use crate::server::{AppState, router};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, short, env = "TGCHECK_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,
}

/// Runs the serve command until Ctrl-C.
pub async fn run(args: &ServeArgs, cli: &Cli) -> Result<()> {
    let settings = cli.probe.load().await?;
    let ctx = ProbeContext::with_settings(settings)?;

    let probes = ProbeRegistry::describe(&ctx);
    let resolver = Arc::new(build_resolver(ctx));
    let app = router(AppState::new(resolver, probes));

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

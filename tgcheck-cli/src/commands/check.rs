//! Check command - resolve usernames from the command line.

use anyhow::Result;
use clap::Args;
use futures::stream::{self, StreamExt};
use tgcheck_core::{CoreError, ResolvedStatus};
use tgcheck_fetch::ProbeContext;
use tgcheck_probes::build_resolver;
use tracing::{debug, info};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Usernames to check, with or without `@`.
    #[arg(required = true)]
    pub usernames: Vec<String>,

    /// Maximum lookups in flight at once.
    #[arg(long, default_value = "4")]
    pub concurrency: usize,
}

/// Runs the check command.
///
/// Results are printed in argument order. The first rejected input is
/// returned as the command's error once every name has been reported.
pub async fn run(args: &CheckArgs, cli: &Cli) -> Result<()> {
    let settings = cli.probe.load().await?;
    let resolver = build_resolver(ProbeContext::with_settings(settings)?);

    info!(count = args.usernames.len(), "Checking usernames");

    let resolver = &resolver;
    let results: Vec<(&str, Result<ResolvedStatus, CoreError>)> =
        stream::iter(args.usernames.iter())
            .map(|raw| async move { (raw.as_str(), resolver.resolve(raw).await) })
            .buffered(args.concurrency.max(1))
            .collect()
            .await;

    let mut first_error = None;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let mut first = true;
            for (raw, result) in results {
                if !first {
                    println!();
                }
                first = false;

                match result {
                    Ok(status) => println!("{}", formatter.format_status(&status)),
                    Err(e) => {
                        println!("{}", formatter.format_error(raw, &e.to_string()));
                        first_error.get_or_insert(e);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            for (raw, result) in results {
                match result {
                    Ok(status) => println!("{}", formatter.format(&status)?),
                    Err(e) => {
                        let body = serde_json::json!({ "username": raw, "error": e.to_string() });
                        println!("{}", formatter.format(&body)?);
                        first_error.get_or_insert(e);
                    }
                }
            }
        }
    }

    match first_error {
        Some(e) => {
            debug!(error = %e, "At least one username was rejected");
            Err(e.into())
        }
        None => Ok(()),
    }
}

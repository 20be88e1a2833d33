//! Probes command - list the probes in execution order.

use anyhow::Result;
use tgcheck_fetch::ProbeContext;
use tgcheck_probes::ProbeRegistry;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the probes command.
pub async fn run(cli: &Cli) -> Result<()> {
    info!("Listing probes");

    let settings = cli.probe.load().await?;
    let ctx = ProbeContext::with_settings(settings)?;
    let probes = ProbeRegistry::describe(&ctx);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_probes_header());
            println!("{}", "─".repeat(50));

            for info in &probes {
                println!("{}", formatter.format_probe_line(info));
            }

            println!();
            println!(
                "Fragment mode: {}  (Telegram fallback last)",
                ctx.settings.fragment_mode
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&probes)?);
        }
    }

    Ok(())
}

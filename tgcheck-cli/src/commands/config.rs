//! Config command - show the effective settings.

use anyhow::Result;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Runs the config command.
pub async fn run(cli: &Cli) -> Result<()> {
    let settings = cli.probe.load().await?;

    match cli.format {
        OutputFormat::Text => {
            println!("tgcheck Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Fragment URL:      {}", settings.fragment_base());
            println!("Telegram URL:      {}", settings.telegram_base());
            println!("Fragment mode:     {}", settings.fragment_mode);
            println!("Fragment timeout:  {:?}", settings.fragment_timeout());
            println!("Telegram timeout:  {:?}", settings.telegram_timeout());
            println!(
                "Hash attempts:     {} ({} ms apart)",
                settings.retry.attempts(),
                settings.retry.delay_ms
            );
            println!("Min length:        {}", settings.min_length);
            println!("On Fragment error: {:?}", settings.fallback.on_error);

            let confirm: Vec<_> = settings
                .fallback
                .confirm_with_telegram
                .iter()
                .map(ToString::to_string)
                .collect();
            if !confirm.is_empty() {
                println!("Confirm on t.me:   {}", confirm.join(", "));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

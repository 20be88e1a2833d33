// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! tgcheck - Telegram username status checker.
//!
//! # Examples
//!
//! ```bash
//! # Serve the HTTP API on 0.0.0.0:3000
//! tgcheck serve
//!
//! # Check one username
//! tgcheck check @durov
//!
//! # JSON output
//! tgcheck check durov --format json --pretty
//!
//! # Only scrape the Fragment page, require five characters
//! tgcheck --fragment-mode web --min-length 5 check someone
//!
//! # List the probes that will run
//! tgcheck probes
//! ```

mod commands;
mod config;
mod output;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tgcheck_core::CoreError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{check, config as config_cmd, probes, serve};
use config::ProbeArgs;

// ============================================================================
// CLI Definition
// ============================================================================

/// tgcheck - Telegram username status checker.
#[derive(Parser)]
#[command(name = "tgcheck")]
#[command(about = "Check Telegram username availability on Fragment and t.me")]
#[command(long_about = r#"
tgcheck reports whether a Telegram username is available, taken, or listed
for sale on the Fragment marketplace.

Fragment is asked first (auction search API, then the username page);
t.me is consulted when Fragment is inconclusive.

Examples:
  tgcheck serve --bind 127.0.0.1:8080   # HTTP API
  tgcheck check @durov                  # One-shot lookup
  tgcheck check a b c --format json     # Several names, JSON lines
  tgcheck probes                        # Probe order
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (debug logging).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Probe configuration.
    #[command(flatten)]
    pub probe: ProbeArgs,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API.
    #[command(visible_alias = "s")]
    Serve(serve::ServeArgs),

    /// Check one or more usernames.
    #[command(visible_alias = "c")]
    Check(check::CheckArgs),

    /// List the probes in execution order.
    #[command(visible_alias = "p")]
    Probes,

    /// Show the effective configuration.
    Config,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// Invalid username.
    InvalidInput = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(cli: &Cli) {
    if cli.quiet {
        return; // No logging in quiet mode
    }

    let default_filter = match (&cli.command, cli.verbose) {
        (_, true) => "tgcheck=debug,tower_http=debug,info",
        (Commands::Serve(_), false) => "tgcheck=info,tower_http=info,warn",
        (_, false) => "tgcheck=warn",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli);

    let result = match &cli.command {
        Commands::Serve(args) => serve::run(args, &cli).await,
        Commands::Check(args) => check::run(args, &cli).await,
        Commands::Probes => probes::run(&cli).await,
        Commands::Config => config_cmd::run(&cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        let code = if e.downcast_ref::<CoreError>().is_some() {
            ExitCode::InvalidInput
        } else {
            ExitCode::Error
        };
        std::process::exit(code as i32);
    }

    Ok(())
}

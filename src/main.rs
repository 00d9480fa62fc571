//! cert-expiry - TLS certificate expiry checker
//!
//! Exit codes:
//! - 0: success (including expired certificates on `check`)
//! - 1: unexpected error
//! - 2: invalid domain argument
//! - 3: `alert` found at least one domain needing attention
//! - 130: cancelled with Ctrl+C

use cert_expiry::cli::{Cli, Commands};
use cert_expiry::commands;
use cert_expiry::config::Settings;
use cert_expiry::utils::{Result, ToolkitError};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

const EXIT_ERROR: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_ALERTS: i32 = 3;
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nCheck cancelled by user");
            std::process::exit(EXIT_CANCELLED);
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            let code = match e {
                ToolkitError::InvalidDomain { .. } => EXIT_INVALID_INPUT,
                _ => EXIT_ERROR,
            };
            std::process::exit(code);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load_default()?,
    };

    match &cli.command {
        Commands::Check(args) => {
            commands::run_check(args, settings).await?;
            Ok(0)
        }
        Commands::Alert(args) => {
            let alerted = commands::run_alert(args, settings).await?;
            Ok(if alerted { EXIT_ALERTS } else { 0 })
        }
    }
}

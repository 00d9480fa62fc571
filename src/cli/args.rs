//! CLI argument definitions using clap

use crate::config::{ProbeSettings, Settings};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cert-expiry")]
#[command(version)]
#[command(about = "Check how long the TLS certificates of a set of domains remain valid", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (TOML); defaults to config/default.toml when present
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check certificate expiry for one or more domains
    Check(CheckArgs),

    /// Evaluate warning thresholds and report domains that need attention
    Alert(AlertArgs),
}

/// Probe options shared by all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// Maximum number of domains checked at once
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-domain timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// TLS port
    #[arg(long)]
    pub port: Option<u16>,
}

impl ProbeArgs {
    /// Override file settings with any flags given on the command line
    pub fn apply(&self, settings: &mut ProbeSettings) {
        if let Some(concurrency) = self.concurrency {
            settings.concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Domains to check (e.g. google.com github.com)
    #[arg(required = true, value_name = "DOMAIN")]
    pub domains: Vec<String>,

    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct AlertArgs {
    /// Domains to check
    #[arg(required = true, value_name = "DOMAIN")]
    pub domains: Vec<String>,

    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Warning thresholds in days, comma separated (e.g. 30,14,7)
    #[arg(short, long, value_delimiter = ',', value_name = "DAYS")]
    pub warning_days: Option<Vec<u32>>,

    /// Report every domain regardless of thresholds
    #[arg(long)]
    pub force: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl AlertArgs {
    pub fn apply(&self, settings: &mut Settings) {
        self.probe.apply(&mut settings.probe);
        if let Some(days) = &self.warning_days {
            settings.alert.warning_days = days.iter().copied().collect();
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console output, streamed as results arrive (default)
    Text,
    /// JSON array in input order
    Json,
    /// One JSON object per line, streamed as results arrive
    Ndjson,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Ndjson => write!(f, "ndjson"),
        }
    }
}

/// Normalize user input to a bare lowercase host name.
///
/// Strips a leading scheme and anything after the host; returns `None` when
/// the result is empty, has no dot, or carries a port.
pub fn normalize_domain(input: &str) -> Option<String> {
    let lowered = input.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let host = without_scheme.split('/').next().unwrap_or_default();

    if host.is_empty() || !host.contains('.') || host.contains(':') || host.contains(char::is_whitespace) {
        None
    } else {
        Some(host.to_string())
    }
}

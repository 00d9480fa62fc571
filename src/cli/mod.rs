//! Command-line interface module
//!
//! This module handles CLI argument parsing using Clap.

pub mod args;

pub use args::{normalize_domain, AlertArgs, CheckArgs, Cli, Commands, OutputFormat, ProbeArgs};

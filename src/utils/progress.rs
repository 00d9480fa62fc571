//! Progress indicators for CLI mode
//!
//! This module provides progress display using indicatif and console.

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Create a progress bar for a batch of domain checks.
///
/// The bar draws to stderr and is hidden when stderr is not a terminal.
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    if let Ok(progress_style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(progress_style.progress_chars("#>-"));
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Print a warning status
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Print an info status
pub fn print_info(message: &str) {
    eprintln!("{} {}", style("ℹ").cyan(), message);
}

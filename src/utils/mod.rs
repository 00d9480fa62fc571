//! Utility modules for cert-expiry
//!
//! This module contains error types, progress indicators, and other utilities.

pub mod error;
pub mod progress;

pub use error::{CheckError, ConfigError, ErrorKind, ProbeError, Result, ToolkitError};
pub use progress::{create_progress_bar, print_info, print_warning};

//! Command implementations for cert-expiry

pub mod alert;
pub mod check;

pub use alert::run_alert;
pub use check::run_check;

use crate::cli::normalize_domain;
use crate::utils::{Result, ToolkitError};

/// Normalize every argument, failing on the first invalid one
pub fn validate_domains(raw: &[String]) -> Result<Vec<String>> {
    raw.iter()
        .map(|input| {
            normalize_domain(input).ok_or_else(|| ToolkitError::InvalidDomain {
                domain: input.trim().to_string(),
            })
        })
        .collect()
}

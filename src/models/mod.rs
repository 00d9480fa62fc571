//! Data models for cert-expiry
//!
//! Plain values produced by the checker and evaluator and owned by callers.

pub mod alert;
pub mod outcome;
pub mod snapshot;

pub use alert::{AlertDecision, AlertReason};
pub use outcome::ProbeOutcome;
pub use snapshot::{format_time_remaining, CertificateSnapshot};

//! cert-expiry library
//!
//! Reports how much validity time remains on the TLS certificates served by
//! a set of domains:
//! - Single-domain probing (resolve, connect, handshake, read `notAfter`)
//! - Concurrent checking with a bounded number of probes in flight
//! - Batch (input-ordered) and streaming (completion-ordered) consumption
//! - Warning-threshold evaluation for scheduled alerting
//!
//! # Usage
//!
//! ```rust,ignore
//! use cert_expiry::config::ProbeSettings;
//! use cert_expiry::runner::Checker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = Checker::from_settings(&ProbeSettings::default()).unwrap();
//!     let outcomes = checker.check_many(["example.com", "github.com"], 4).await.unwrap();
//!     // Process outcomes...
//! }
//! ```

pub mod alert;
pub mod checks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use alert::{evaluate, ThresholdEvaluator};
pub use checks::{CertificateProber, Prober};
pub use cli::Cli;
pub use config::Settings;
pub use models::{AlertDecision, CertificateSnapshot, ProbeOutcome};
pub use runner::Checker;
pub use utils::{CheckError, ErrorKind, ProbeError, Result, ToolkitError};

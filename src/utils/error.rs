//! Custom error types for cert-expiry
//!
//! Per-domain probe failures are data (`ProbeError` inside an outcome), while
//! `CheckError` and `ConfigError` abort the surrounding call.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Top-level error type for the cert-expiry binary
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Check error: {0}")]
    Check(#[from] CheckError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TLS configuration error: {0}")]
    TlsConfig(#[from] rustls::Error),

    #[error("Invalid domain name '{domain}'")]
    InvalidDomain { domain: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(#[from] anyhow::Error),
}

/// Classification tag of a failed probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    ResolutionError,
    Timeout,
    TlsError,
    CertificateParseError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ResolutionError => "ResolutionError",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::TlsError => "TlsError",
            ErrorKind::CertificateParseError => "CertificateParseError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single domain could not be checked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("DNS resolution failed for {domain}: {message}")]
    Resolution { domain: String, message: String },

    #[error("Timed out checking {domain}: {message}")]
    Timeout { domain: String, message: String },

    #[error("TLS error for {domain}: {message}")]
    Tls { domain: String, message: String },

    #[error("Failed to read certificate expiry for {domain}: {message}")]
    CertificateParse { domain: String, message: String },
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::Resolution { .. } => ErrorKind::ResolutionError,
            ProbeError::Timeout { .. } => ErrorKind::Timeout,
            ProbeError::Tls { .. } => ErrorKind::TlsError,
            ProbeError::CertificateParse { .. } => ErrorKind::CertificateParseError,
        }
    }

    pub fn domain(&self) -> &str {
        match self {
            ProbeError::Resolution { domain, .. }
            | ProbeError::Timeout { domain, .. }
            | ProbeError::Tls { domain, .. }
            | ProbeError::CertificateParse { domain, .. } => domain,
        }
    }
}

/// Caller contract violations that abort a whole `check_many` call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("Concurrency limit must be at least 1, got {limit}")]
    InvalidConcurrency { limit: usize },

    #[error("Domain at position {index} is empty")]
    EmptyDomain { index: usize },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;

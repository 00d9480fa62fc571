//! Certificate parsing
//!
//! Reads the "not valid after" timestamp from a DER-encoded X.509
//! certificate using x509-parser.

use crate::utils::ProbeError;
use chrono::{DateTime, TimeZone, Utc};
use x509_parser::prelude::*;

/// Certificate expiry reader
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateChecker;

impl CertificateChecker {
    /// Create a new certificate checker
    pub fn new() -> Self {
        Self
    }

    /// Parse the expiry instant of a DER-encoded certificate served by `domain`
    pub fn not_after(&self, domain: &str, der: &[u8]) -> Result<DateTime<Utc>, ProbeError> {
        let (_, cert) = X509Certificate::from_der(der).map_err(|e| parse_error(domain, e))?;

        asn1_time_to_datetime(cert.validity().not_after)
            .ok_or_else(|| parse_error(domain, "notAfter is out of range"))
    }
}

fn parse_error(domain: &str, message: impl std::fmt::Display) -> ProbeError {
    ProbeError::CertificateParse {
        domain: domain.to_string(),
        message: message.to_string(),
    }
}

/// Convert ASN.1 time to chrono DateTime
fn asn1_time_to_datetime(time: ASN1Time) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(time.timestamp(), 0).single()
}

//! Per-domain probe outcome

use crate::models::CertificateSnapshot;
use crate::utils::{ErrorKind, ProbeError};
use serde::{Serialize, Serializer};

/// Result of checking one requested domain: a snapshot or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Requested domain, lowercased
    pub domain: String,
    pub result: Result<CertificateSnapshot, ProbeError>,
}

impl ProbeOutcome {
    pub fn new(domain: impl Into<String>, result: Result<CertificateSnapshot, ProbeError>) -> Self {
        Self {
            domain: domain.into(),
            result,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn snapshot(&self) -> Option<&CertificateSnapshot> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.result.as_ref().err()
    }

    pub(crate) fn record(&self) -> OutcomeRecord<'_> {
        let error = self.error();
        OutcomeRecord {
            domain: &self.domain,
            data: self.snapshot(),
            error: error.map(|e| e.to_string()),
            error_kind: error.map(ProbeError::kind),
        }
    }
}

/// Wire shape shared by outcomes and alert decisions
#[derive(Serialize)]
pub(crate) struct OutcomeRecord<'a> {
    domain: &'a str,
    data: Option<&'a CertificateSnapshot>,
    error: Option<String>,
    error_kind: Option<ErrorKind>,
}

impl Serialize for ProbeOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

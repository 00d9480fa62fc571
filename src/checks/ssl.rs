//! TLS handshake
//!
//! Performs a verified rustls handshake with SNI set to the domain and hands
//! back the leaf certificate the server presented.

use crate::utils::ProbeError;
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::{ClientConfig, RootCertStore};
use std::io;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

/// TLS handshake runner shared by all probes
#[derive(Clone)]
pub struct SslChecker {
    connector: TlsConnector,
}

impl SslChecker {
    /// Build a checker trusting the Mozilla root set
    pub fn new() -> Result<Self, rustls::Error> {
        let root_store = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        Self::with_roots(root_store)
    }

    /// Build a checker trusting a custom root store
    pub fn with_roots(root_store: RootCertStore) -> Result<Self, rustls::Error> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
        })
    }

    /// Handshake over `stream` and return the leaf certificate (DER).
    ///
    /// The TLS stream is dropped before returning, which closes the socket.
    pub async fn leaf_certificate(
        &self,
        domain: &str,
        stream: TcpStream,
    ) -> Result<CertificateDer<'static>, ProbeError> {
        let server_name =
            ServerName::try_from(domain.to_string()).map_err(|e| ProbeError::Tls {
                domain: domain.to_string(),
                message: format!("invalid server name: {}", e),
            })?;

        let tls_stream = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|e| classify_handshake_error(domain, e))?;

        let (_, connection) = tls_stream.get_ref();
        debug!(
            %domain,
            protocol = ?connection.protocol_version(),
            "tls handshake complete"
        );

        connection
            .peer_certificates()
            .and_then(|certs| certs.first())
            .map(|leaf| leaf.clone().into_owned())
            .ok_or_else(|| ProbeError::CertificateParse {
                domain: domain.to_string(),
                message: "server presented no certificate".to_string(),
            })
    }
}

fn classify_handshake_error(domain: &str, err: io::Error) -> ProbeError {
    match err.kind() {
        io::ErrorKind::TimedOut => ProbeError::Timeout {
            domain: domain.to_string(),
            message: err.to_string(),
        },
        _ => ProbeError::Tls {
            domain: domain.to_string(),
            message: err.to_string(),
        },
    }
}

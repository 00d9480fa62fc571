//! Single-domain certificate probe
//!
//! Composes resolution, TCP connect, TLS handshake and certificate parsing
//! under one deadline.

use crate::checks::{CertificateChecker, SslChecker, TcpChecker};
use crate::config::ProbeSettings;
use crate::models::CertificateSnapshot;
use crate::utils::ProbeError;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Something that can fetch a certificate snapshot for one domain.
///
/// The checker drives any implementation; tests substitute synthetic ones.
pub trait Prober: Send + Sync + 'static {
    fn probe(
        &self,
        domain: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<CertificateSnapshot, ProbeError>> + Send;
}

/// Prober that talks TLS to `domain` on the configured port
#[derive(Clone)]
pub struct CertificateProber {
    tcp: TcpChecker,
    ssl: SslChecker,
    certificate: CertificateChecker,
}

impl CertificateProber {
    /// Create a prober for port 443
    pub fn new() -> Result<Self, rustls::Error> {
        Self::with_port(443)
    }

    pub fn with_port(port: u16) -> Result<Self, rustls::Error> {
        Ok(Self::from_parts(TcpChecker::new(port), SslChecker::new()?))
    }

    pub fn from_settings(settings: &ProbeSettings) -> Result<Self, rustls::Error> {
        Self::with_port(settings.port)
    }

    pub fn from_parts(tcp: TcpChecker, ssl: SslChecker) -> Self {
        Self {
            tcp,
            ssl,
            certificate: CertificateChecker::new(),
        }
    }

    async fn fetch_expiry(&self, domain: &str) -> Result<DateTime<Utc>, ProbeError> {
        let stream = self.tcp.connect(domain).await?;
        let leaf = self.ssl.leaf_certificate(domain, stream).await?;
        self.certificate.not_after(domain, leaf.as_ref())
    }
}

impl Prober for CertificateProber {
    async fn probe(&self, domain: &str, timeout: Duration) -> Result<CertificateSnapshot, ProbeError> {
        // Dropping the inner future on timeout closes any open socket.
        let expiry = tokio::time::timeout(timeout, self.fetch_expiry(domain))
            .await
            .map_err(|_| ProbeError::Timeout {
                domain: domain.to_string(),
                message: format!("no response within {}s", timeout.as_secs_f64()),
            })??;

        let snapshot = CertificateSnapshot::now(expiry);
        debug!(
            %domain,
            expiry = %snapshot.expiry,
            days_remaining = snapshot.days_remaining,
            "certificate parsed"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorKind;
    use std::time::Instant;

    #[tokio::test]
    async fn test_silent_listener_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Accept and hold the socket without ever answering the ClientHello
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let prober = CertificateProber::with_port(port).unwrap();
        let timeout = Duration::from_millis(300);
        let start = Instant::now();
        let err = prober.probe("localhost", timeout).await.unwrap_err();
        let elapsed = start.elapsed();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(elapsed >= timeout);
        assert!(elapsed < timeout + Duration::from_secs(1), "took {:?}", elapsed);

        server.abort();
    }

    #[tokio::test]
    async fn test_unresolvable_domain() {
        let prober = CertificateProber::new().unwrap();
        let err = prober
            .probe("this-domain-does-not-exist-12345.invalid", Duration::from_secs(10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResolutionError);
    }
}

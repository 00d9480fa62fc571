//! TCP connectivity
//!
//! Resolves a domain through the system resolver and opens a TCP connection
//! to the first address that accepts one.

use crate::utils::ProbeError;
use std::io;
use std::net::SocketAddr;
use tokio::net::{lookup_host, TcpStream};
use tracing::debug;

/// TCP connector for certificate probes
#[derive(Debug, Clone)]
pub struct TcpChecker {
    port: u16,
}

impl TcpChecker {
    /// Create a new TCP connector for the given port
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Resolve `domain` to socket addresses on the configured port
    pub async fn resolve(&self, domain: &str) -> Result<Vec<SocketAddr>, ProbeError> {
        let addrs: Vec<SocketAddr> = lookup_host((domain, self.port))
            .await
            .map_err(|e| ProbeError::Resolution {
                domain: domain.to_string(),
                message: e.to_string(),
            })?
            .collect();

        if addrs.is_empty() {
            return Err(ProbeError::Resolution {
                domain: domain.to_string(),
                message: "no addresses returned".to_string(),
            });
        }

        Ok(addrs)
    }

    /// Connect to `domain`, trying every resolved address in order
    pub async fn connect(&self, domain: &str) -> Result<TcpStream, ProbeError> {
        let addrs = self.resolve(domain).await?;
        let mut last_error = None;

        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    debug!(%domain, %addr, "tcp connected");
                    return Ok(stream);
                }
                Err(e) => {
                    debug!(%domain, %addr, error = %e, "tcp connect failed");
                    last_error = Some(e);
                }
            }
        }

        let err = last_error.unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "no address"));
        Err(classify_connect_error(domain, err))
    }
}

/// Map a connect failure onto the probe taxonomy.
///
/// A refused or reset connection means no handshake could take place.
fn classify_connect_error(domain: &str, err: io::Error) -> ProbeError {
    match err.kind() {
        io::ErrorKind::TimedOut => ProbeError::Timeout {
            domain: domain.to_string(),
            message: err.to_string(),
        },
        _ => ProbeError::Tls {
            domain: domain.to_string(),
            message: format!("connection failed: {}", err),
        },
    }
}

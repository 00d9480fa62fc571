//! Check modules for cert-expiry
//!
//! Each stage of a single-domain probe lives in its own module; `probe`
//! ties them together.

pub mod certificate;
pub mod probe;
pub mod ssl;
pub mod tcp;

pub use certificate::CertificateChecker;
pub use probe::{CertificateProber, Prober};
pub use ssl::SslChecker;
pub use tcp::TcpChecker;

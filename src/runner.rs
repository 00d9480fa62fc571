//! Concurrent certificate checking
//!
//! Runs one probe per requested domain with at most `concurrency_limit`
//! probes in flight. A single producer yields outcomes in completion order;
//! batch mode drains it into an input-ordered buffer.

use crate::checks::{CertificateProber, Prober};
use crate::config::ProbeSettings;
use crate::models::ProbeOutcome;
use crate::utils::CheckError;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Checks many domains concurrently with per-domain failure isolation
pub struct Checker<P = CertificateProber> {
    prober: Arc<P>,
    timeout: Duration,
}

impl<P> Clone for Checker<P> {
    fn clone(&self) -> Self {
        Self {
            prober: Arc::clone(&self.prober),
            timeout: self.timeout,
        }
    }
}

impl Checker<CertificateProber> {
    /// Build a TLS-backed checker from probe settings
    pub fn from_settings(settings: &ProbeSettings) -> Result<Self, rustls::Error> {
        Ok(Self::new(
            CertificateProber::from_settings(settings)?,
            settings.timeout(),
        ))
    }
}

impl<P: Prober> Checker<P> {
    /// Create a checker; `timeout` applies to each probe from its dispatch
    pub fn new(prober: P, timeout: Duration) -> Self {
        Self {
            prober: Arc::new(prober),
            timeout,
        }
    }

    /// Check a single domain; same validation and result as a batch of one
    pub async fn probe(&self, domain: &str) -> Result<ProbeOutcome, CheckError> {
        let domain = normalize(0, domain)?;
        let result = self.prober.probe(&domain, self.timeout).await;
        Ok(ProbeOutcome::new(domain, result))
    }

    /// Stream outcomes in completion order, one per input domain.
    ///
    /// The stream is lazy: probes only run while it is polled.
    pub fn check_many_stream<I, S>(
        &self,
        domains: I,
        concurrency_limit: usize,
    ) -> Result<BoxStream<'static, ProbeOutcome>, CheckError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = prepare(domains, concurrency_limit)?;
        Ok(self
            .dispatch(domains, concurrency_limit)
            .map(|(_, outcome)| outcome)
            .boxed())
    }

    /// Check every domain and return outcomes in input order
    pub async fn check_many<I, S>(
        &self,
        domains: I,
        concurrency_limit: usize,
    ) -> Result<Vec<ProbeOutcome>, CheckError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.check_many_inspect(domains, concurrency_limit, |_| {}).await
    }

    /// Batch mode with a callback invoked as each outcome completes
    pub async fn check_many_inspect<I, S, F>(
        &self,
        domains: I,
        concurrency_limit: usize,
        mut on_complete: F,
    ) -> Result<Vec<ProbeOutcome>, CheckError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&ProbeOutcome),
    {
        let domains = prepare(domains, concurrency_limit)?;
        let mut slots: Vec<Option<ProbeOutcome>> = vec![None; domains.len()];

        let outcomes = self.dispatch(domains, concurrency_limit);
        futures::pin_mut!(outcomes);
        while let Some((index, outcome)) = outcomes.next().await {
            on_complete(&outcome);
            slots[index] = Some(outcome);
        }

        Ok(slots.into_iter().flatten().collect())
    }

    fn dispatch(
        &self,
        domains: Vec<String>,
        concurrency_limit: usize,
    ) -> impl Stream<Item = (usize, ProbeOutcome)> + Send + 'static {
        let prober = Arc::clone(&self.prober);
        let timeout = self.timeout;
        info!(
            domains = domains.len(),
            concurrency = concurrency_limit,
            "checking certificates"
        );

        stream::iter(domains.into_iter().enumerate())
            .map(move |(index, domain)| {
                let prober = Arc::clone(&prober);
                async move {
                    debug!(%domain, index, "probe dispatched");
                    let result = prober.probe(&domain, timeout).await;
                    match &result {
                        Ok(snapshot) => {
                            debug!(%domain, days_remaining = snapshot.days_remaining, "probe succeeded")
                        }
                        Err(e) => warn!(%domain, kind = %e.kind(), error = %e, "probe failed"),
                    }
                    (index, ProbeOutcome::new(domain, result))
                }
            })
            .buffer_unordered(concurrency_limit)
    }
}

/// Validate the call and normalize domains to lowercase
fn prepare<I, S>(domains: I, concurrency_limit: usize) -> Result<Vec<String>, CheckError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if concurrency_limit == 0 {
        return Err(CheckError::InvalidConcurrency {
            limit: concurrency_limit,
        });
    }

    domains
        .into_iter()
        .enumerate()
        .map(|(index, domain)| normalize(index, domain.as_ref()))
        .collect()
}

fn normalize(index: usize, domain: &str) -> Result<String, CheckError> {
    let domain = domain.trim().to_lowercase();
    if domain.is_empty() {
        Err(CheckError::EmptyDomain { index })
    } else {
        Ok(domain)
    }
}

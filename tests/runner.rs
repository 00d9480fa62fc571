use cert_expiry::checks::{CertificateProber, Prober};
use cert_expiry::models::CertificateSnapshot;
use cert_expiry::runner::Checker;
use cert_expiry::utils::{CheckError, ErrorKind, ProbeError};
use chrono::{TimeDelta, Utc};
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Default)]
struct Stats {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
    timeouts_seen: Mutex<Vec<Duration>>,
}

/// Prober that sleeps per domain and fails anything starting with "fail"
struct SlowProber {
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    stats: Arc<Stats>,
}

impl SlowProber {
    fn new(default_delay: Duration) -> (Self, Arc<Stats>) {
        let stats = Arc::new(Stats::default());
        let prober = Self {
            delays: HashMap::new(),
            default_delay,
            stats: Arc::clone(&stats),
        };
        (prober, stats)
    }

    fn with_delay(mut self, domain: &str, delay: Duration) -> Self {
        self.delays.insert(domain.to_string(), delay);
        self
    }
}

impl Prober for SlowProber {
    async fn probe(&self, domain: &str, timeout: Duration) -> Result<CertificateSnapshot, ProbeError> {
        self.stats.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.stats.timeouts_seen.lock() {
            seen.push(timeout);
        }
        let current = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.delays.get(domain).copied().unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);

        if domain.starts_with("fail") {
            return Err(ProbeError::Tls {
                domain: domain.to_string(),
                message: "certificate verify failed".to_string(),
            });
        }
        let now = Utc::now();
        Ok(CertificateSnapshot::at(now + TimeDelta::days(45) + TimeDelta::hours(3), now))
    }
}

#[tokio::test]
async fn test_empty_input_batch_and_stream() {
    let (prober, stats) = SlowProber::new(Duration::from_millis(5));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let batch = checker.check_many(Vec::<String>::new(), 4).await.unwrap();
    assert!(batch.is_empty());

    let mut stream = checker.check_many_stream(Vec::<String>::new(), 4).unwrap();
    assert!(stream.next().await.is_none());
    assert_eq!(stats.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_batch_preserves_input_order() {
    let (prober, _) = SlowProber::new(Duration::from_millis(5));
    let prober = prober
        .with_delay("slow.example", Duration::from_millis(200))
        .with_delay("fail.example", Duration::from_millis(50));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let input = ["slow.example", "fail.example", "fast.example", "slow.example"];
    let outcomes = checker.check_many(input, 4).await.unwrap();

    assert_eq!(outcomes.len(), input.len());
    for (outcome, domain) in outcomes.iter().zip(input) {
        assert_eq!(outcome.domain, domain);
    }
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1].error().map(|e| e.kind()), Some(ErrorKind::TlsError));
    assert!(outcomes[2].is_success());
    assert!(outcomes[3].is_success());
}

#[tokio::test]
async fn test_batch_normalizes_case() {
    let (prober, _) = SlowProber::new(Duration::from_millis(1));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let outcomes = checker.check_many(["Example.COM"], 1).await.unwrap();
    assert_eq!(outcomes[0].domain, "example.com");
}

#[tokio::test]
async fn test_duplicates_probed_independently() {
    let (prober, stats) = SlowProber::new(Duration::from_millis(5));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let outcomes = checker
        .check_many(["a.example", "a.example", "a.example"], 2)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(stats.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_stream_emits_in_completion_order() {
    let (prober, _) = SlowProber::new(Duration::from_millis(10));
    let prober = prober
        .with_delay("a.example", Duration::from_millis(500))
        .with_delay("c.example", Duration::from_millis(250));
    let checker = Checker::new(prober, Duration::from_secs(2));

    let outcomes: Vec<_> = checker
        .check_many_stream(["a.example", "b.example", "c.example"], 3)
        .unwrap()
        .collect()
        .await;

    let order: Vec<&str> = outcomes.iter().map(|o| o.domain.as_str()).collect();
    assert_eq!(order, vec!["b.example", "c.example", "a.example"]);
}

#[tokio::test]
async fn test_stream_yields_each_domain_once() {
    let (prober, _) = SlowProber::new(Duration::from_millis(5));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let input = vec!["x.example", "fail.example", "x.example", "y.example"];
    let mut emitted: Vec<String> = checker
        .check_many_stream(&input, 2)
        .unwrap()
        .map(|o| o.domain)
        .collect()
        .await;

    let mut expected: Vec<String> = input.iter().map(|d| d.to_string()).collect();
    emitted.sort();
    expected.sort();
    assert_eq!(emitted, expected);
}

#[tokio::test]
async fn test_concurrency_limit_is_respected() {
    let (prober, stats) = SlowProber::new(Duration::from_millis(20));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let domains: Vec<String> = (0..20).map(|i| format!("host{}.example", i)).collect();
    let outcomes = checker.check_many(&domains, 3).await.unwrap();

    assert_eq!(outcomes.len(), 20);
    let max = stats.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 3, "saw {} probes in flight", max);
    assert!(max >= 2, "slots were not refilled concurrently");
}

#[tokio::test]
async fn test_limit_of_one_is_sequential() {
    let (prober, stats) = SlowProber::new(Duration::from_millis(10));
    let checker = Checker::new(prober, Duration::from_secs(1));

    checker
        .check_many(["a.example", "b.example", "c.example", "d.example"], 1)
        .await
        .unwrap();

    assert_eq!(stats.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failure_does_not_delay_siblings() {
    let (prober, _) = SlowProber::new(Duration::from_millis(5));
    let prober = prober.with_delay("fail.example", Duration::from_millis(400));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let start = Instant::now();
    let mut stream = checker
        .check_many_stream(["fail.example", "ok.example"], 2)
        .unwrap();
    let first = stream.next().await.unwrap();

    assert_eq!(first.domain, "ok.example");
    assert!(start.elapsed() < Duration::from_millis(300));

    let second = stream.next().await.unwrap();
    assert!(!second.is_success());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_zero_limit_is_contract_violation() {
    let (prober, stats) = SlowProber::new(Duration::from_millis(1));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let err = checker.check_many(["a.example"], 0).await.unwrap_err();
    assert_eq!(err, CheckError::InvalidConcurrency { limit: 0 });
    assert!(checker.check_many_stream(["a.example"], 0).is_err());
    assert_eq!(stats.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_checker_passes_its_timeout() {
    let (prober, stats) = SlowProber::new(Duration::from_millis(1));
    let checker = Checker::new(prober, Duration::from_millis(1500));

    checker.check_many(["a.example", "b.example"], 2).await.unwrap();

    let seen = stats.timeouts_seen.lock().unwrap();
    assert_eq!(seen.as_slice(), &[Duration::from_millis(1500); 2]);
}

#[tokio::test]
async fn test_single_probe_matches_batch_of_one() {
    let (prober, _) = SlowProber::new(Duration::from_millis(1));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let single = checker.probe("example.com").await.unwrap();
    let snapshot = single.snapshot().unwrap();
    assert_eq!(single.domain, "example.com");
    assert_eq!(snapshot.days_remaining, 45);
    assert!(!snapshot.is_expired);
    assert_eq!(snapshot.time_remaining_display, "45 days, 3 hours");
}

#[tokio::test]
async fn test_single_probe_rejects_blank_domain_like_batch() {
    let (prober, stats) = SlowProber::new(Duration::from_millis(1));
    let checker = Checker::new(prober, Duration::from_secs(1));

    for blank in ["", "   "] {
        let single = checker.probe(blank).await.unwrap_err();
        let batch = checker.check_many([blank], 1).await.unwrap_err();
        assert_eq!(single, CheckError::EmptyDomain { index: 0 });
        assert_eq!(single, batch);
    }
    assert_eq!(stats.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_single_probe_normalizes_like_batch() {
    let (prober, _) = SlowProber::new(Duration::from_millis(1));
    let checker = Checker::new(prober, Duration::from_secs(1));

    let single = checker.probe("  Example.COM ").await.unwrap();
    let batch = checker.check_many(["  Example.COM "], 1).await.unwrap();
    assert_eq!(single.domain, "example.com");
    assert_eq!(single.domain, batch[0].domain);
}

#[tokio::test]
async fn test_timeout_starts_at_dispatch() {
    // Listener that accepts connections and never speaks TLS
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let prober = CertificateProber::with_port(port).unwrap();
    let timeout = Duration::from_millis(250);
    let checker = Checker::new(prober, timeout);

    let start = Instant::now();
    let outcomes = checker.check_many(["localhost", "localhost"], 1).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert_eq!(outcome.error().map(|e| e.kind()), Some(ErrorKind::Timeout));
    }
    // Sequential probes each get the full timeout
    assert!(elapsed >= timeout * 2, "finished after {:?}", elapsed);
    assert!(elapsed < timeout * 2 + Duration::from_secs(1), "finished after {:?}", elapsed);

    server.abort();
}

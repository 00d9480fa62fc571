//! Threshold evaluation for scheduled alerting
//!
//! Stateless: every evaluation looks only at the current outcome, so a
//! threshold that stays crossed alerts on every run.

use crate::models::{AlertDecision, CertificateSnapshot, ProbeOutcome};
use std::collections::BTreeSet;
use tracing::debug;

/// Decides which checked domains need a notification
#[derive(Debug, Clone)]
pub struct ThresholdEvaluator {
    warning_days: BTreeSet<u32>,
}

impl ThresholdEvaluator {
    pub fn new(warning_days: impl IntoIterator<Item = u32>) -> Self {
        Self {
            warning_days: warning_days.into_iter().collect(),
        }
    }

    /// Evaluate one outcome
    pub fn evaluate(&self, outcome: ProbeOutcome, force: bool) -> AlertDecision {
        evaluate(outcome, &self.warning_days, force)
    }

    /// Evaluate a batch, preserving order
    pub fn evaluate_all(&self, outcomes: Vec<ProbeOutcome>, force: bool) -> Vec<AlertDecision> {
        outcomes
            .into_iter()
            .map(|outcome| self.evaluate(outcome, force))
            .collect()
    }
}

/// Thresholds `t` with `days_remaining <= t`
pub fn crossed_thresholds(
    snapshot: &CertificateSnapshot,
    warning_days: &BTreeSet<u32>,
) -> BTreeSet<u32> {
    warning_days
        .iter()
        .copied()
        .filter(|&days| snapshot.days_remaining <= i64::from(days))
        .collect()
}

/// Decide whether `outcome` warrants an alert.
///
/// Errors and expired certificates always alert; otherwise any crossed
/// threshold or `force` does.
pub fn evaluate(outcome: ProbeOutcome, warning_days: &BTreeSet<u32>, force: bool) -> AlertDecision {
    let (crossed, should_alert) = match outcome.snapshot() {
        Some(snapshot) => {
            let crossed = crossed_thresholds(snapshot, warning_days);
            let should_alert = !crossed.is_empty() || snapshot.is_expired || force;
            (crossed, should_alert)
        }
        None => (BTreeSet::new(), true),
    };

    debug!(
        domain = %outcome.domain,
        crossed = ?crossed,
        should_alert,
        "threshold evaluation"
    );

    AlertDecision {
        outcome,
        crossed_thresholds: crossed,
        should_alert,
    }
}

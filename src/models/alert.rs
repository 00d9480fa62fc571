//! Alert decision for the scheduled notification run

use crate::models::outcome::OutcomeRecord;
use crate::models::ProbeOutcome;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Whether one checked domain warrants a notification.
///
/// Built fresh on every run; nothing about earlier runs is remembered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDecision {
    pub outcome: ProbeOutcome,
    /// Configured warning days that `days_remaining` is at or below
    pub crossed_thresholds: BTreeSet<u32>,
    pub should_alert: bool,
}

/// Primary reason a decision alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertReason {
    /// The domain could not be checked
    Unreachable,
    Expired,
    /// Tightest crossed threshold
    Threshold(u32),
    Forced,
}

impl fmt::Display for AlertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertReason::Unreachable => write!(f, "Could not be checked"),
            AlertReason::Expired => write!(f, "EXPIRED"),
            AlertReason::Threshold(days) => write!(f, "Within {} day warning", days),
            AlertReason::Forced => write!(f, "Forced notification"),
        }
    }
}

impl AlertDecision {
    pub fn domain(&self) -> &str {
        &self.outcome.domain
    }

    pub fn reason(&self) -> Option<AlertReason> {
        if !self.should_alert {
            return None;
        }
        match self.outcome.snapshot() {
            None => Some(AlertReason::Unreachable),
            Some(snapshot) if snapshot.is_expired => Some(AlertReason::Expired),
            Some(_) => match self.crossed_thresholds.iter().next() {
                Some(days) => Some(AlertReason::Threshold(*days)),
                None => Some(AlertReason::Forced),
            },
        }
    }
}

#[derive(Serialize)]
struct DecisionRecord<'a> {
    #[serde(flatten)]
    outcome: OutcomeRecord<'a>,
    crossed_thresholds: Vec<u32>,
    should_alert: bool,
}

impl Serialize for AlertDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DecisionRecord {
            outcome: self.outcome.record(),
            crossed_thresholds: self.crossed_thresholds.iter().rev().copied().collect(),
            should_alert: self.should_alert,
        }
        .serialize(serializer)
    }
}

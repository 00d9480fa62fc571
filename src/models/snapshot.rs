//! Certificate expiry snapshot

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Expiry information for a successfully probed leaf certificate.
///
/// All derived fields come from a single `now`, so `is_expired` and the sign
/// of `days_remaining` always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSnapshot {
    /// Not valid after (UTC)
    #[serde(rename = "expiry_date")]
    pub expiry: DateTime<Utc>,
    /// Human-readable time remaining, e.g. "45 days, 3 hours"
    #[serde(rename = "time_remaining_str")]
    pub time_remaining_display: String,
    /// Whether the certificate has expired
    pub is_expired: bool,
    /// Whole days until expiry, rounded toward negative infinity
    pub days_remaining: i64,
}

impl CertificateSnapshot {
    /// Derive a snapshot for `expiry` as seen at `now`
    pub fn at(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = expiry.signed_duration_since(now);
        let days_remaining = floor_days(remaining);

        Self {
            expiry,
            time_remaining_display: format_time_remaining(remaining),
            is_expired: days_remaining < 0,
            days_remaining,
        }
    }

    /// Derive a snapshot against the current clock
    pub fn now(expiry: DateTime<Utc>) -> Self {
        Self::at(expiry, Utc::now())
    }

    /// Not expired, with fewer than `days` whole days remaining
    pub fn is_expiring_within(&self, days: i64) -> bool {
        !self.is_expired && self.days_remaining < days
    }
}

/// `num_days` truncates toward zero; step down for negative remainders.
fn floor_days(remaining: TimeDelta) -> i64 {
    let days = remaining.num_days();
    if remaining < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Format the time left before expiry
pub fn format_time_remaining(remaining: TimeDelta) -> String {
    if remaining < TimeDelta::zero() {
        return "EXPIRED".to_string();
    }

    let days = remaining.num_days();
    let hours = (remaining - TimeDelta::days(days)).num_hours();

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(plural(days, "day"));
    }
    if hours > 0 {
        parts.push(plural(hours, "hour"));
    }

    if parts.is_empty() {
        "less than an hour".to_string()
    } else {
        parts.join(", ")
    }
}

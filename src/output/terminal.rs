//! Terminal output formatting

use crate::models::{AlertDecision, ProbeOutcome};
use console::style;

/// Console status of one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertStatus {
    Valid,
    ExpiringSoon,
    Expired,
    /// The domain could not be checked
    Error,
}

impl CertStatus {
    pub fn classify(outcome: &ProbeOutcome, expiring_soon_days: i64) -> Self {
        match outcome.snapshot() {
            None => CertStatus::Error,
            Some(snapshot) if snapshot.is_expired => CertStatus::Expired,
            Some(snapshot) if snapshot.is_expiring_within(expiring_soon_days) => {
                CertStatus::ExpiringSoon
            }
            Some(_) => CertStatus::Valid,
        }
    }
}

/// Render one outcome as a console block
pub fn render_outcome(outcome: &ProbeOutcome, expiring_soon_days: i64) -> String {
    let mut lines = vec![style(&outcome.domain).bold().to_string()];

    match &outcome.result {
        Err(e) => {
            lines.push(format!(
                "{} {}",
                style(format!("ERROR [{}]:", e.kind())).red().dim(),
                e
            ));
        }
        Ok(snapshot) => {
            lines.push(format!(
                "Certificate expires: {}",
                snapshot.expiry.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            lines.push(format!("Time Remaining: {}", snapshot.time_remaining_display));

            let status = match CertStatus::classify(outcome, expiring_soon_days) {
                CertStatus::Expired => style("STATUS: EXPIRED".to_string()).red().bold(),
                CertStatus::ExpiringSoon => style(format!(
                    "STATUS: EXPIRING SOON (less than {} days)",
                    expiring_soon_days
                ))
                .yellow(),
                _ => style("STATUS: VALID".to_string()).green(),
            };
            lines.push(status.to_string());
        }
    }

    lines.join("\n")
}

/// Print one outcome followed by a blank line
pub fn print_outcome(outcome: &ProbeOutcome, expiring_soon_days: i64) {
    println!("{}\n", render_outcome(outcome, expiring_soon_days));
}

/// Print counts per status
pub fn print_summary(outcomes: &[ProbeOutcome], expiring_soon_days: i64) {
    let count = |status: CertStatus| {
        outcomes
            .iter()
            .filter(|o| CertStatus::classify(o, expiring_soon_days) == status)
            .count()
    };

    println!("{}", style("━━━ Summary ━━━").cyan().bold());
    println!("  Total domains checked: {}", style(outcomes.len()).bold());
    println!("  Valid: {}", style(count(CertStatus::Valid)).green());
    println!(
        "  Expiring soon (<{} days): {}",
        expiring_soon_days,
        style(count(CertStatus::ExpiringSoon)).yellow()
    );
    println!("  Already expired: {}", style(count(CertStatus::Expired)).red());
    println!("  Could not be checked: {}", style(count(CertStatus::Error)).red().dim());
}

/// Render an alert decision as a single line
pub fn render_decision(decision: &AlertDecision) -> String {
    let reason = match decision.reason() {
        Some(reason) => reason.to_string(),
        None => return format!("{} {}", style("✓").green(), decision.domain()),
    };

    let detail = match &decision.outcome.result {
        Ok(snapshot) => format!(
            "expires {} ({} days remaining)",
            snapshot.expiry.format("%Y-%m-%d %H:%M:%S UTC"),
            snapshot.days_remaining
        ),
        Err(e) => e.to_string(),
    };

    format!(
        "{} {} {} - {}",
        style("⚠ ALERT:").red().bold(),
        style(decision.domain()).bold(),
        style(reason).yellow(),
        detail
    )
}

pub fn print_decision(decision: &AlertDecision) {
    println!("{}", render_decision(decision));
}

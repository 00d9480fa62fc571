//! Alert command implementation
//!
//! Meant to run from a scheduler: checks every domain, evaluates warning
//! thresholds, and reports the domains that need attention. Delivery of the
//! report (mail etc.) is left to whatever invokes the command.

use crate::alert::ThresholdEvaluator;
use crate::cli::{AlertArgs, OutputFormat};
use crate::commands::validate_domains;
use crate::config::Settings;
use crate::output::{print_decision, print_json, write_ndjson_line};
use crate::runner::Checker;
use crate::utils::{create_progress_bar, print_info, print_warning, Result};
use tracing::info;

/// Run the alert command; returns whether any domain alerted
pub async fn run_alert(args: &AlertArgs, mut settings: Settings) -> Result<bool> {
    let domains = validate_domains(&args.domains)?;
    args.apply(&mut settings);
    settings.validate()?;

    let checker = Checker::from_settings(&settings.probe)?;
    let evaluator = ThresholdEvaluator::new(settings.alert.warning_days.iter().copied());

    let pb = create_progress_bar(domains.len() as u64, "Checking certificates");
    let outcomes = checker
        .check_many_inspect(&domains, settings.probe.concurrency, |_| pb.inc(1))
        .await?;
    pb.finish_and_clear();

    let decisions = evaluator.evaluate_all(outcomes, args.force);
    let alerting = decisions.iter().filter(|d| d.should_alert).count();
    info!(
        domains = decisions.len(),
        alerting,
        force = args.force,
        "alert evaluation complete"
    );

    match args.format {
        OutputFormat::Text => {
            for decision in &decisions {
                print_decision(decision);
            }
            println!();
            if alerting > 0 {
                print_warning(&format!(
                    "{} of {} domains need attention",
                    alerting,
                    decisions.len()
                ));
            } else {
                print_info("No certificates need attention");
            }
        }
        OutputFormat::Json => print_json(&decisions)?,
        OutputFormat::Ndjson => {
            let mut stdout = std::io::stdout().lock();
            for decision in &decisions {
                write_ndjson_line(&mut stdout, decision)?;
            }
        }
    }

    Ok(alerting > 0)
}

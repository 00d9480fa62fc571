//! Check command implementation

use crate::cli::{CheckArgs, OutputFormat};
use crate::commands::validate_domains;
use crate::config::Settings;
use crate::output::{print_json, print_outcome, print_summary, write_ndjson_line};
use crate::runner::Checker;
use crate::utils::{create_progress_bar, Result};
use futures::StreamExt;
use std::io::Write;

/// Run the check command
pub async fn run_check(args: &CheckArgs, mut settings: Settings) -> Result<()> {
    let domains = validate_domains(&args.domains)?;
    args.probe.apply(&mut settings.probe);
    settings.validate()?;

    let checker = Checker::from_settings(&settings.probe)?;
    let limit = settings.probe.concurrency;
    let expiring_soon_days = settings.alert.expiring_soon_days;

    match args.format {
        OutputFormat::Text => {
            let mut outcomes = checker.check_many_stream(&domains, limit)?;
            let mut seen = Vec::with_capacity(domains.len());
            while let Some(outcome) = outcomes.next().await {
                print_outcome(&outcome, expiring_soon_days);
                seen.push(outcome);
            }
            if seen.len() > 1 {
                print_summary(&seen, expiring_soon_days);
            }
        }
        OutputFormat::Ndjson => {
            let mut outcomes = checker.check_many_stream(&domains, limit)?;
            let stdout = std::io::stdout();
            while let Some(outcome) = outcomes.next().await {
                let mut handle = stdout.lock();
                write_ndjson_line(&mut handle, &outcome)?;
            }
            stdout.lock().flush()?;
        }
        OutputFormat::Json => {
            let pb = create_progress_bar(domains.len() as u64, "Checking certificates");
            let outcomes = checker
                .check_many_inspect(&domains, limit, |_| pb.inc(1))
                .await?;
            pb.finish_and_clear();
            print_json(&outcomes)?;
        }
    }

    Ok(())
}

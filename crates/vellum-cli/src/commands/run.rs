//! Run command implementation.

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use vellum_domain::DocumentRef;
use vellum_pipeline::Orchestrator;

/// Execute the run command.
pub async fn execute_run(
    args: RunArgs,
    orchestrator: &Orchestrator,
    formatter: &Formatter,
) -> Result<()> {
    if args.bucket.trim().is_empty() || args.key.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Bucket and key must not be empty".to_string(),
        ));
    }

    let report = orchestrator
        .run(DocumentRef::new(args.bucket, args.key))
        .await;
    println!("{}", formatter.format_report(&report)?);

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::RunsFailed(1))
    }
}

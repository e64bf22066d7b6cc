//! Event command implementation.

use crate::cli::EventArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::Read;
use vellum_pipeline::Orchestrator;

/// Read the envelope text from a file, or stdin for "-".
pub fn read_envelope(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Execute the event command.
pub async fn execute_event(
    args: EventArgs,
    orchestrator: &Orchestrator,
    formatter: &Formatter,
) -> Result<()> {
    let raw = read_envelope(&args.path)?;
    let report = orchestrator.handle_event_str(&raw).await;
    println!("{}", formatter.format_report(&report)?);

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::RunsFailed(1))
    }
}

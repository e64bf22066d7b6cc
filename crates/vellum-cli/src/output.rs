//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};
use vellum_domain::StoredRecord;
use vellum_pipeline::{RunOutcome, RunReport};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of one run.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Text => Ok(self.format_report_text(report)),
        }
    }

    fn format_report_json(&self, report: &RunReport) -> Result<String> {
        let states: Vec<String> = report.states.iter().map(|s| format!("{:?}", s)).collect();
        let value = match &report.outcome {
            RunOutcome::Done { record } => serde_json::json!({
                "run_id": report.run_id.to_string(),
                "document": report.document,
                "outcome": "done",
                "record": record,
                "states": states,
            }),
            RunOutcome::Failed { error } => serde_json::json!({
                "run_id": report.run_id.to_string(),
                "document": report.document,
                "outcome": "failed",
                "stage": error.stage(),
                "error": error.to_string(),
                "states": states,
            }),
        };
        Ok(serde_json::to_string(&value)?)
    }

    fn format_report_text(&self, report: &RunReport) -> String {
        let document = report
            .document
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "<no document>".to_string());

        match &report.outcome {
            RunOutcome::Done { record } if report.escalated() => self.warning(&format!(
                "{} escalated for review and stored ({}, {}) [run {}]",
                document, record.language, record.status, report.run_id
            )),
            RunOutcome::Done { record } => self.success(&format!(
                "{} stored ({}, {}) [run {}]",
                document, record.language, record.status, report.run_id
            )),
            RunOutcome::Failed { error } => self.error(&format!(
                "{} failed at {}: {} [run {}]",
                document,
                error.stage(),
                error,
                report.run_id
            )),
        }
    }

    /// Format a stored record.
    pub fn format_record(&self, record: &StoredRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Text => Ok(self.format_record_table(record)),
        }
    }

    fn format_record_table(&self, record: &StoredRecord) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["id", record.id.as_str()]);
        builder.push_record(["language", record.language.as_str()]);
        builder.push_record(["status", record.status.as_str()]);
        builder.push_record(["document_type", record.document_type.as_str()]);
        builder.push_record(["summary", record.summary.as_str()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::first()).with(Alignment::right()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vellum - guarded metadata extraction for stored documents.
#[derive(Debug, Parser)]
#[command(name = "vellum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VELLUM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// One human-readable line per run (default)
    Text,
    /// JSON objects
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process one document
    Run(RunArgs),

    /// Process one trigger envelope from a file or stdin
    Event(EventArgs),

    /// Process newline-delimited trigger envelopes from stdin
    Watch(WatchArgs),

    /// Show a stored record
    Show(ShowArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Bucket the document is stored in
    #[arg(short, long)]
    pub bucket: String,

    /// Document key within the bucket
    #[arg(short, long)]
    pub key: String,
}

/// Arguments for the event command.
#[derive(Debug, Parser)]
pub struct EventArgs {
    /// JSON file holding the envelope ("-" reads stdin)
    #[arg(default_value = "-")]
    pub path: String,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Runs kept in flight at once (overrides pipeline.max_concurrent_runs)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Record id (the document key)
    #[arg(short, long)]
    pub id: String,

    /// Record language
    #[arg(short, long)]
    pub language: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

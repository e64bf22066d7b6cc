//! Vellum CLI - guarded metadata extraction for stored documents.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vellum_cli::{app, commands};
use vellum_cli::{Cli, CliError, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    // Log to stderr; stdout carries one line per run
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A watch interrupted by Ctrl+C may leave stdin mid-read, so exit explicitly
    let code = match run().await {
        Ok(()) => 0,
        Err(CliError::RunsFailed(count)) => {
            tracing::debug!("{} run(s) failed", count);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };
    std::process::exit(code);
}

async fn run() -> vellum_cli::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    config.validate()?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Show(args) => {
            let store = app::open_store(&config)?;
            commands::execute_show(args, &store, &formatter)?;
        }
        Command::Run(args) => {
            let orchestrator = app::build_orchestrator(&config)?;
            commands::execute_run(args, &orchestrator, &formatter).await?;
        }
        Command::Event(args) => {
            let orchestrator = app::build_orchestrator(&config)?;
            commands::execute_event(args, &orchestrator, &formatter).await?;
        }
        Command::Watch(args) => {
            let orchestrator = app::build_orchestrator(&config)?;
            let concurrency = config.pipeline.max_concurrent_runs;
            commands::execute_watch(args, orchestrator, concurrency, &formatter).await?;
        }
    }

    Ok(())
}

//! Watch command implementation.

use crate::cli::WatchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use vellum_pipeline::{Orchestrator, PipelineWorker, WorkerStop};

/// Execute the watch command.
///
/// Reads one JSON envelope per line from stdin until EOF. Lines that are not
/// JSON are reported and skipped.
pub async fn execute_watch(
    args: WatchArgs,
    orchestrator: Orchestrator,
    default_concurrency: usize,
    formatter: &Formatter,
) -> Result<()> {
    let concurrency = args.concurrency.unwrap_or(default_concurrency);
    if concurrency == 0 {
        return Err(CliError::InvalidInput(
            "Concurrency must be greater than 0".to_string(),
        ));
    }

    let (tx, rx) = mpsc::channel(concurrency * 4);
    let reader = tokio::spawn(forward_lines(BufReader::new(tokio::io::stdin()), tx));

    let mut worker = PipelineWorker::new(Arc::new(orchestrator), concurrency);
    let stop = worker
        .run(rx, |report| match formatter.format_report(report) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
        })
        .await?;

    let skipped = match stop {
        // The reader dropped its sender on return, so its count is ready
        WorkerStop::ChannelClosed => reader
            .await
            .map_err(|e| CliError::InvalidInput(format!("stdin reader failed: {}", e)))??,
        // Still blocked on stdin
        WorkerStop::Shutdown => {
            reader.abort();
            0
        }
    };

    eprintln!("{}", formatter.info(&worker.metrics().summary()));

    let failed = worker.metrics().total_failed() + skipped;
    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::RunsFailed(failed))
    }
}

/// Send each JSON line from `input`; returns the number of lines skipped.
async fn forward_lines<R>(input: R, tx: mpsc::Sender<serde_json::Value>) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut skipped = 0;
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(envelope) => {
                if tx.send(envelope).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Skipping line {}: not valid JSON ({})", line_number, e);
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forward_lines_counts_skipped_lines() {
        let input = "{\"detail\": {}}\n\nnot json\n{\"body\": {}}\n";
        let (tx, mut rx) = mpsc::channel(8);

        let skipped = forward_lines(input.as_bytes(), tx).await.unwrap();

        assert_eq!(skipped, 1);
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_rejected() {
        let mut config = crate::config::Config::default();
        config.store.database_path = ":memory:".to_string();
        let orchestrator = crate::app::build_orchestrator(&config).unwrap();
        let formatter = Formatter::new(crate::config::OutputFormat::Text, false);

        let result = execute_watch(
            WatchArgs {
                concurrency: Some(0),
            },
            orchestrator,
            8,
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}

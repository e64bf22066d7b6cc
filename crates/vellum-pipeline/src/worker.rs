//! Background worker for a stream of trigger events

use crate::{Orchestrator, PipelineError, PipelineMetrics, RunReport};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinSet};

/// Why the worker stopped taking envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStop {
    /// Every sender was dropped and the channel drained
    ChannelClosed,
    /// The shutdown signal fired first
    Shutdown,
}

/// Runs one orchestration per received envelope, a bounded number at a time
///
/// The worker stops taking new envelopes when the channel closes or Ctrl+C
/// is received, then waits for the runs already in flight.
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use vellum_pipeline::{Orchestrator, PipelineWorker};
/// # async fn example(orchestrator: Orchestrator) -> Result<(), Box<dyn std::error::Error>> {
/// let (tx, rx) = tokio::sync::mpsc::channel(64);
/// let mut worker = PipelineWorker::new(Arc::new(orchestrator), 8);
///
/// tx.send(serde_json::json!({"detail": {"bucket": {"name": "inbox"}, "object": {"key": "a.txt"}}}))
///     .await?;
/// drop(tx);
///
/// let stop = worker.run(rx, |report| println!("{:?}", report.outcome)).await?;
/// println!("{:?}\n{}", stop, worker.metrics().summary());
/// # Ok(())
/// # }
/// ```
pub struct PipelineWorker {
    orchestrator: Arc<Orchestrator>,
    permits: Arc<Semaphore>,
    max_concurrent_runs: usize,
    metrics: PipelineMetrics,
}

impl PipelineWorker {
    /// Create a worker allowing `max_concurrent_runs` runs in flight
    pub fn new(orchestrator: Arc<Orchestrator>, max_concurrent_runs: usize) -> Self {
        let max_concurrent_runs = max_concurrent_runs.max(1);
        Self {
            orchestrator,
            permits: Arc::new(Semaphore::new(max_concurrent_runs)),
            max_concurrent_runs,
            metrics: PipelineMetrics::new(),
        }
    }

    /// Consume envelopes until the channel closes or Ctrl+C
    ///
    /// `on_report` is called once per finished run, in completion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the concurrency limiter is closed underneath the
    /// worker.
    pub async fn run<F>(
        &mut self,
        events: mpsc::Receiver<Value>,
        on_report: F,
    ) -> Result<WorkerStop, PipelineError>
    where
        F: FnMut(&RunReport),
    {
        self.run_until(events, tokio::signal::ctrl_c(), on_report)
            .await
    }

    /// Consume envelopes until the channel closes or `shutdown` completes
    ///
    /// A permit is taken before the next envelope is received, so the
    /// shutdown signal is observed even while every permit is in use.
    pub async fn run_until<S, F>(
        &mut self,
        mut events: mpsc::Receiver<Value>,
        shutdown: S,
        mut on_report: F,
    ) -> Result<WorkerStop, PipelineError>
    where
        S: Future,
        F: FnMut(&RunReport),
    {
        let mut in_flight = JoinSet::new();
        let mut held = None;
        tokio::pin!(shutdown);

        tracing::info!(
            "Pipeline worker started (max concurrent runs: {})",
            self.max_concurrent_runs
        );

        let stop = loop {
            tokio::select! {
                acquired = self.permits.clone().acquire_owned(), if held.is_none() => {
                    held = Some(acquired.map_err(|e| PipelineError::Worker(e.to_string()))?);
                }
                received = events.recv(), if held.is_some() => {
                    let (Some(envelope), Some(permit)) = (received, held.take()) else {
                        tracing::debug!("Event channel closed");
                        break WorkerStop::ChannelClosed;
                    };
                    let orchestrator = self.orchestrator.clone();
                    in_flight.spawn(async move {
                        let report = orchestrator.handle_event(&envelope).await;
                        drop(permit);
                        report
                    });
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    self.complete(joined, &mut on_report);
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, draining {} runs", in_flight.len());
                    break WorkerStop::Shutdown;
                }
            }
        };

        while let Some(joined) = in_flight.join_next().await {
            self.complete(joined, &mut on_report);
        }

        tracing::info!("Pipeline worker stopped. Final metrics:\n{}", self.metrics.summary());
        Ok(stop)
    }

    fn complete<F>(&mut self, joined: Result<RunReport, JoinError>, on_report: &mut F)
    where
        F: FnMut(&RunReport),
    {
        match joined {
            Ok(report) => {
                self.metrics.record(&report);
                on_report(&report);
            }
            Err(e) => {
                tracing::error!("Run task aborted: {}", e);
                self.metrics.record_aborted();
            }
        }
    }

    /// Metrics over the runs completed so far
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }
}

//! Run orchestration
//!
//! A run steps through an explicit state machine:
//!
//! ```text
//! Extracting -> Deciding -> [Notifying] -> Storing -> Done
//!                    \            \            \
//!                     +------------+------------+--> Failed
//! ```
//!
//! `Deciding` maps the task result onto a [`Decision`]; every guardrail
//! disposition has exactly one transition. The orchestrator itself never
//! retries a step.
//!
//! The run timeout bounds every step before `Storing`. A run that reaches
//! `Storing` within its budget awaits the write to completion, so a run
//! reported as `Failed(Timeout)` never leaves a record behind.

use crate::error::RunError;
use crate::event::{parse_trigger, parse_trigger_str};
use crate::notifier::EscalationNotifier;
use crate::task::ExtractionTask;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{error, info, info_span, Instrument};
use vellum_domain::traits::RecordStore;
use vellum_domain::{
    DocumentRef, ExtractedMetadata, GuardrailDisposition, RecordStatus, RunId, StoredRecord,
    TaskOutcome, TaskResult,
};

/// Default end-to-end budget for one run
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(600);

/// Name of a state a run passed through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateName {
    /// Running the extraction task
    Extracting,
    /// Choosing the branch from the task result
    Deciding,
    /// Escalating to a human
    Notifying,
    /// Writing the final record
    Storing,
    /// Terminal success
    Done,
    /// Terminal failure
    Failed,
}

/// Branch taken after the extraction task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Store the metadata directly with this status
    Store(RecordStatus, ExtractedMetadata),
    /// Notify a human, then store the metadata as intervened
    Escalate(ExtractedMetadata),
    /// End the run with the task's error message
    Fail(String),
}

impl Decision {
    /// Decide the branch for a task result
    pub fn for_result(result: TaskResult) -> Self {
        match result.outcome {
            TaskOutcome::Succeeded {
                metadata,
                disposition: GuardrailDisposition::Pass,
            } => Decision::Store(RecordStatus::Succeeded, metadata),
            TaskOutcome::Succeeded {
                metadata,
                disposition: GuardrailDisposition::Intervened,
            } => Decision::Escalate(metadata),
            TaskOutcome::Failed { error } => Decision::Fail(error),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Store(status, _) => write!(f, "store as {}", status),
            Decision::Escalate(_) => write!(f, "escalate"),
            Decision::Fail(_) => write!(f, "fail"),
        }
    }
}

enum RunState {
    Extracting,
    Deciding(TaskResult),
    Notifying(StoredRecord),
    Storing(StoredRecord),
    Done(StoredRecord),
    Failed(RunError),
}

impl RunState {
    fn name(&self) -> StateName {
        match self {
            RunState::Extracting => StateName::Extracting,
            RunState::Deciding(_) => StateName::Deciding,
            RunState::Notifying(_) => StateName::Notifying,
            RunState::Storing(_) => StateName::Storing,
            RunState::Done(_) => StateName::Done,
            RunState::Failed(_) => StateName::Failed,
        }
    }
}

/// Terminal outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Record was written
    Done {
        /// The record as stored
        record: StoredRecord,
    },
    /// Run ended without a write
    Failed {
        /// Why it failed
        error: RunError,
    },
}

/// Everything observable about one finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Run identifier
    pub run_id: RunId,
    /// Triggering document; `None` when the envelope carried none
    pub document: Option<DocumentRef>,
    /// Terminal outcome
    pub outcome: RunOutcome,
    /// States visited, in order
    pub states: Vec<StateName>,
}

impl RunReport {
    /// Whether the run reached `Done`
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RunOutcome::Done { .. })
    }

    /// Stored record, if the run succeeded
    pub fn record(&self) -> Option<&StoredRecord> {
        match &self.outcome {
            RunOutcome::Done { record } => Some(record),
            RunOutcome::Failed { .. } => None,
        }
    }

    /// Failure, if the run failed
    pub fn error(&self) -> Option<&RunError> {
        match &self.outcome {
            RunOutcome::Done { .. } => None,
            RunOutcome::Failed { error } => Some(error),
        }
    }

    /// Whether the run passed through `Notifying`
    pub fn escalated(&self) -> bool {
        self.states.contains(&StateName::Notifying)
    }
}

/// Drives one run per trigger event
///
/// Distinct runs share nothing but the collaborators, so one orchestrator
/// behind an `Arc` can serve any number of concurrent runs.
pub struct Orchestrator {
    task: ExtractionTask,
    notifier: EscalationNotifier,
    store: Arc<dyn RecordStore>,
    run_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator with the default run timeout
    pub fn new(
        task: ExtractionTask,
        notifier: EscalationNotifier,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            task,
            notifier,
            store,
            run_timeout: DEFAULT_RUN_TIMEOUT,
        }
    }

    /// Set the end-to-end budget for each run
    pub fn with_run_timeout(mut self, run_timeout: Duration) -> Self {
        self.run_timeout = run_timeout;
        self
    }

    /// Configured run timeout
    pub fn run_timeout(&self) -> Duration {
        self.run_timeout
    }

    /// Handle one trigger envelope
    ///
    /// An envelope without a bucket or key ends the run as
    /// `Failed(InvalidEvent)` before any collaborator is called.
    pub async fn handle_event(&self, envelope: &Value) -> RunReport {
        match parse_trigger(envelope) {
            Ok(document) => self.run(document).await,
            Err(error) => rejected(error),
        }
    }

    /// Handle one trigger envelope given as JSON text
    ///
    /// Text that is not JSON is rejected the same way as an envelope
    /// missing its bucket or key.
    pub async fn handle_event_str(&self, raw: &str) -> RunReport {
        match parse_trigger_str(raw) {
            Ok(document) => self.run(document).await,
            Err(error) => rejected(error),
        }
    }

    /// Run the pipeline for `document`
    pub async fn run(&self, document: DocumentRef) -> RunReport {
        let run_id = RunId::new();
        let span = info_span!(
            "run",
            run_id = %run_id,
            bucket = %document.bucket,
            key = %document.key
        );

        let mut states = Vec::new();
        let outcome = async {
            info!("Run started");
            let outcome = self.drive(&document, &mut states).await;

            match &outcome {
                RunOutcome::Done { record } => {
                    info!("Run done: stored ({}, {}) as {}", record.id, record.language, record.status)
                }
                RunOutcome::Failed { error } => {
                    error!(document = %document, stage = error.stage(), "Run failed: {}", error)
                }
            }
            outcome
        }
        .instrument(span)
        .await;

        RunReport {
            run_id,
            document: Some(document),
            outcome,
            states,
        }
    }

    async fn drive(&self, document: &DocumentRef, states: &mut Vec<StateName>) -> RunOutcome {
        let deadline = Instant::now() + self.run_timeout;
        let timed_out = || RunState::Failed(RunError::Timeout(self.run_timeout));

        let mut state = RunState::Extracting;
        loop {
            states.push(state.name());
            state = match state {
                RunState::Extracting => match timeout_at(deadline, self.task.run(document)).await {
                    Ok(result) => RunState::Deciding(result),
                    Err(_) => timed_out(),
                },
                RunState::Deciding(result) => decide(document, result),
                RunState::Notifying(record) => {
                    match timeout_at(deadline, self.notifier.notify(document)).await {
                        Ok(Ok(())) => RunState::Storing(record),
                        Ok(Err(e)) => RunState::Failed(e.into()),
                        Err(_) => timed_out(),
                    }
                }
                // The write is atomic and not raced against the deadline
                RunState::Storing(_) if Instant::now() >= deadline => timed_out(),
                RunState::Storing(record) => match self.store.put(&record).await {
                    Ok(()) => RunState::Done(record),
                    Err(e) => RunState::Failed(e.into()),
                },
                RunState::Done(record) => return RunOutcome::Done { record },
                RunState::Failed(error) => return RunOutcome::Failed { error },
            };
        }
    }
}

fn rejected(error: RunError) -> RunReport {
    let run_id = RunId::new();
    error!(run_id = %run_id, "Rejected trigger: {}", error);
    RunReport {
        run_id,
        document: None,
        outcome: RunOutcome::Failed { error },
        states: vec![StateName::Failed],
    }
}

fn decide(document: &DocumentRef, result: TaskResult) -> RunState {
    let decision = Decision::for_result(result);
    info!("Decision: {}", decision);

    match decision {
        Decision::Store(status, metadata) => {
            RunState::Storing(StoredRecord::new(document, metadata, status))
        }
        Decision::Escalate(metadata) => RunState::Notifying(StoredRecord::new(
            document,
            metadata,
            RecordStatus::GuardrailIntervened,
        )),
        Decision::Fail(error) => RunState::Failed(RunError::Extraction(error)),
    }
}

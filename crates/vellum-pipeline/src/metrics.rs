//! Metrics collection for pipeline runs

use crate::orchestrator::RunReport;
use std::collections::BTreeMap;

/// Counters over the runs a worker has completed
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    /// Runs that stored a record without escalation
    pub succeeded: usize,

    /// Runs that escalated to a human and stored a record
    pub escalated: usize,

    /// Failed runs per failing stage
    pub failed: BTreeMap<&'static str, usize>,

    /// Runs whose task panicked or was cancelled
    pub aborted: usize,
}

impl PipelineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run
    pub fn record(&mut self, report: &RunReport) {
        match report.error() {
            None if report.escalated() => self.escalated += 1,
            None => self.succeeded += 1,
            Some(error) => *self.failed.entry(error.stage()).or_insert(0) += 1,
        }
    }

    /// Record a run that never produced a report
    pub fn record_aborted(&mut self) {
        self.aborted += 1;
    }

    /// Total failed runs across all stages
    pub fn total_failed(&self) -> usize {
        self.failed.values().sum::<usize>() + self.aborted
    }

    /// Total runs seen
    pub fn total_runs(&self) -> usize {
        self.succeeded + self.escalated + self.total_failed()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Pipeline Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Runs: {}", self.total_runs()),
            format!("Succeeded: {}", self.succeeded),
            format!("Escalated: {}", self.escalated),
            format!("Failed: {}", self.total_failed()),
        ];

        for (stage, count) in &self.failed {
            lines.push(format!("  {}: {}", stage, count));
        }
        if self.aborted > 0 {
            lines.push(format!("  aborted: {}", self.aborted));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunError;
    use crate::orchestrator::{RunOutcome, StateName};
    use vellum_domain::{DocumentRef, ExtractedMetadata, RecordStatus, RunId, StoredRecord};

    fn done(states: Vec<StateName>) -> RunReport {
        let document = DocumentRef::new("inbox", "a.txt");
        let record = StoredRecord::new(
            &document,
            ExtractedMetadata::new("memo", "en", "s"),
            RecordStatus::Succeeded,
        );
        RunReport {
            run_id: RunId::new(),
            document: Some(document),
            outcome: RunOutcome::Done { record },
            states,
        }
    }

    fn failed(error: RunError) -> RunReport {
        RunReport {
            run_id: RunId::new(),
            document: None,
            outcome: RunOutcome::Failed { error },
            states: vec![StateName::Failed],
        }
    }

    #[test]
    fn test_record_outcomes() {
        let mut metrics = PipelineMetrics::new();
        metrics.record(&done(vec![StateName::Extracting, StateName::Storing]));
        metrics.record(&done(vec![StateName::Notifying, StateName::Storing]));
        metrics.record(&failed(RunError::Extraction("Invalid JSON Generated.".into())));
        metrics.record(&failed(RunError::InvalidEvent("missing object key".into())));
        metrics.record(&failed(RunError::Extraction("Document not found".into())));
        metrics.record_aborted();

        assert_eq!(metrics.succeeded, 1);
        assert_eq!(metrics.escalated, 1);
        assert_eq!(metrics.failed.get("extraction"), Some(&2));
        assert_eq!(metrics.total_failed(), 4);
        assert_eq!(metrics.total_runs(), 6);
    }

    #[test]
    fn test_summary_lists_failed_stages() {
        let mut metrics = PipelineMetrics::new();
        metrics.record(&failed(RunError::InvalidEvent("missing bucket name".into())));

        let summary = metrics.summary();
        assert!(summary.contains("Runs: 1"));
        assert!(summary.contains("invalid_event: 1"));
        assert!(!summary.contains("aborted"));
    }
}

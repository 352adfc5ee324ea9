//! Per-document outcomes and run summaries.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapter::ClassificationResult;

/// Where a document is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentState {
    Discovered,
    TextLoaded,
    Cleaned,
    FeatureExtracted,
    Classified,
    Emitted,
    SkippedMissingCompanion,
    Failed,
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentState::Discovered => "discovered",
            DocumentState::TextLoaded => "text loaded",
            DocumentState::Cleaned => "cleaned",
            DocumentState::FeatureExtracted => "features extracted",
            DocumentState::Classified => "classified",
            DocumentState::Emitted => "emitted",
            DocumentState::SkippedMissingCompanion => "skipped (missing companion)",
            DocumentState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The final outcome of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DocumentOutcome {
    Classified(ClassificationResult),
    Skipped { file_name: String, reason: String },
    Failed { file_name: String, reason: String },
}

impl DocumentOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            DocumentOutcome::Classified(result) => &result.file_name,
            DocumentOutcome::Skipped { file_name, .. } => file_name,
            DocumentOutcome::Failed { file_name, .. } => file_name,
        }
    }

    /// The terminal state this outcome corresponds to.
    pub fn state(&self) -> DocumentState {
        match self {
            DocumentOutcome::Classified(_) => DocumentState::Classified,
            DocumentOutcome::Skipped { .. } => DocumentState::SkippedMissingCompanion,
            DocumentOutcome::Failed { .. } => DocumentState::Failed,
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            DocumentOutcome::Classified(result) => Some(result),
            _ => None,
        }
    }
}

/// Document counts of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// PDFs found in the directory.
    pub discovered: usize,
    pub classified: usize,
    /// PDFs without a readable companion text.
    pub skipped: usize,
    /// Documents whose classification failed or timed out.
    pub failed: usize,
}

impl BatchSummary {
    /// Count outcomes.
    pub fn from_outcomes(outcomes: &[DocumentOutcome]) -> Self {
        let mut summary = BatchSummary {
            discovered: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                DocumentOutcome::Classified(_) => summary.classified += 1,
                DocumentOutcome::Skipped { .. } => summary.skipped += 1,
                DocumentOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} skipped={} failed={}",
            self.classified, self.skipped, self.failed
        )
    }
}

/// Everything a run produced, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Classified documents only.
    pub results: Vec<ClassificationResult>,
    /// Every discovered document.
    pub outcomes: Vec<DocumentOutcome>,
    pub summary: BatchSummary,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Assemble a report from ordered outcomes.
    pub fn new(outcomes: Vec<DocumentOutcome>, elapsed: Duration) -> Self {
        let results = outcomes
            .iter()
            .filter_map(|outcome| outcome.result().cloned())
            .collect();
        BatchReport {
            results,
            summary: BatchSummary::from_outcomes(&outcomes),
            outcomes,
            elapsed,
        }
    }
}

//! Core shared types.

use serde::{Deserialize, Serialize};

/// Outcome of a single file conversion within a batch.
///
/// `Unsupported` and `AdapterFailed` are per-file data: the orchestrator
/// records their status text and keeps going. Reconciliation defects are not
/// represented here because they abort the enclosing chunk instead of being
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskOutcome {
    /// The backend completed and returned its status text.
    Completed(String),
    /// No registered backend supports the conversion pair.
    Unsupported,
    /// The backend ran and signalled failure; details are in the logs.
    AdapterFailed,
}

impl TaskOutcome {
    /// The status text recorded for this outcome.
    pub fn status_text(&self) -> &str {
        match self {
            TaskOutcome::Completed(text) => text,
            TaskOutcome::Unsupported => "File type not supported",
            TaskOutcome::AdapterFailed => "Failed, check logs",
        }
    }

    /// Whether the conversion produced output worth reconciling.
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Completed(_))
    }
}

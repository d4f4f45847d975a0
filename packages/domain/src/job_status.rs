//! Lifecycle states of a remote job.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a tracked job.
///
/// Every job starts in [`JobStatus::Pending`] as soon as it is submitted.
/// [`JobStatus::Succeeded`] and [`JobStatus::Failed`] are terminal: once
/// reached, polling stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted by the API, not yet picked up (`starting` and unknown states)
    Pending,
    /// The remote model is running
    Processing,
    /// Finished with an artifact
    Succeeded,
    /// Finished with an error reason
    Failed,
}

impl JobStatus {
    /// Map a wire status string to a status.
    ///
    /// Only `succeeded` and `failed` are terminal. Anything the API reports
    /// that is not `processing` counts as still pending.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            "processing" => Self::Processing,
            _ => Self::Pending,
        }
    }

    /// Check if this is a terminal state (no further polling)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

//! Tracked state of a submitted job and its status transitions.

use crate::endpoints::predictions::{PredictionResponse, VoiceCloneOutput};
use crate::error::{Error, Result};
use serde_json::Value;
use voicely_domain::{Artifact, JobKind, JobStatus};

/// Reason reported when a failed prediction carries no `error` text
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Opaque reference to a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle {
    id: String,
    kind: JobKind,
}

impl JobHandle {
    pub fn new(id: impl Into<String>, kind: JobKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }
}

/// Mutable state of one job, owned by the polling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    id: String,
    kind: JobKind,
    status: JobStatus,
    result: Option<Artifact>,
    error_detail: Option<String>,
}

impl Job {
    /// State of a job right after submission, before the first poll
    pub fn submitted(handle: &JobHandle) -> Self {
        Self {
            id: handle.id.clone(),
            kind: handle.kind,
            status: JobStatus::Pending,
            result: None,
            error_detail: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Present only when the job succeeded
    pub fn result(&self) -> Option<&Artifact> {
        self.result.as_ref()
    }

    /// Present only when the job failed
    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    /// Fold one status response into the job.
    ///
    /// Terminal states are absorbing: once a job has succeeded or failed,
    /// later responses leave it untouched. A `succeeded` response without a
    /// usable output is rejected and the job is not modified.
    pub fn apply(&mut self, response: PredictionResponse) -> Result<JobStatus> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        match JobStatus::from_wire(&response.status) {
            JobStatus::Succeeded => {
                let artifact = extract_artifact(self.kind, response.output)?;
                self.status = JobStatus::Succeeded;
                self.result = Some(artifact);
            }
            JobStatus::Failed => {
                let reason = response
                    .error
                    .filter(|reason| !reason.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                self.status = JobStatus::Failed;
                self.error_detail = Some(reason);
            }
            progress => self.status = progress,
        }

        Ok(self.status)
    }

    /// Convert a terminal job into the value delivered to the caller
    pub fn into_outcome(self) -> Result<Artifact> {
        match (self.status, self.result, self.error_detail) {
            (JobStatus::Succeeded, Some(artifact), _) => Ok(artifact),
            (JobStatus::Failed, _, reason) => Err(Error::RemoteJobFailed(
                reason.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )),
            (status, _, _) => Err(Error::InvalidResponse(format!(
                "job {} has no outcome in status {status}",
                self.id
            ))),
        }
    }
}

fn extract_artifact(kind: JobKind, output: Option<Value>) -> Result<Artifact> {
    let output = match output {
        Some(Value::Null) | None => {
            return Err(Error::InvalidResponse(
                "prediction succeeded without output".to_string(),
            ));
        }
        Some(output) => output,
    };

    match kind {
        JobKind::SpeechSynthesis => match output {
            Value::String(url) if !url.trim().is_empty() => Ok(Artifact::audio_url(url)),
            other => Err(Error::InvalidResponse(format!(
                "expected audio URL output, got {other}"
            ))),
        },
        JobKind::VoiceClone => {
            let cloned: VoiceCloneOutput = serde_json::from_value(output)
                .map_err(|e| Error::InvalidResponse(format!("malformed clone output: {e}")))?;
            if cloned.voice_id.trim().is_empty() {
                return Err(Error::InvalidResponse(
                    "clone output has an empty voice_id".to_string(),
                ));
            }
            Ok(Artifact::voice(cloned.voice_id, cloned.preview))
        }
    }
}

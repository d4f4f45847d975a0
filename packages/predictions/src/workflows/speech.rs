use super::Workflow;
use crate::client::PredictionClient;
use crate::error::{Error, Result};
use crate::poll::{CancelToken, Delay, TokioDelay};
use crate::transport::{HttpTransport, ReqwestTransport};
use tracing::warn;
use voicely_domain::{Artifact, JobKind, JobSpec, SpeechInput};

/// Text to speech: submit, poll every second, deliver the audio URL.
pub struct SpeechSynthesis<T = ReqwestTransport, D = TokioDelay> {
    client: PredictionClient<T, D>,
}

impl<T: HttpTransport, D: Delay> SpeechSynthesis<T, D> {
    pub fn new(client: PredictionClient<T, D>) -> Self {
        Self { client }
    }

    pub async fn synthesize(&self, input: SpeechInput, cancel: &CancelToken) -> Result<Artifact> {
        if input.text.trim().is_empty() {
            return Err(Error::InvalidInput("text to synthesize is empty".to_string()));
        }

        let spec = JobSpec::speech(input);
        let job = self.client.run(&spec, cancel).await?;
        let job_id = job.id().to_string();

        job.into_outcome().inspect_err(|e| {
            warn!(job_id = %job_id, error = %e, "speech synthesis failed");
        })
    }
}

impl<T: HttpTransport, D: Delay> Workflow for SpeechSynthesis<T, D> {
    type Input = SpeechInput;

    const KIND: JobKind = JobKind::SpeechSynthesis;

    async fn run(&self, input: SpeechInput, cancel: CancelToken) -> Result<Artifact> {
        self.synthesize(input, &cancel).await
    }
}

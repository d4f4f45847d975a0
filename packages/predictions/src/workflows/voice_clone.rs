use super::Workflow;
use crate::blob::BlobStore;
use crate::client::PredictionClient;
use crate::error::{Error, Result};
use crate::poll::{CancelToken, Delay, TokioDelay};
use crate::transport::{HttpTransport, ReqwestTransport};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use voicely_domain::{Artifact, JobKind, JobSpec, VoiceCloneInput};

/// Largest sample accepted for cloning (19 MiB)
pub const MAX_SAMPLE_BYTES: usize = 19 * 1024 * 1024;

/// Raw recording plus the name the user gave the voice.
#[derive(Debug, Clone)]
pub struct VoiceSample {
    pub audio: Bytes,
    pub name: String,
}

impl VoiceSample {
    pub fn new(audio: impl Into<Bytes>, name: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            name: name.into(),
        }
    }
}

/// Voice cloning: host the sample, submit, poll every two seconds, deliver
/// the new voice id.
pub struct VoiceClone<B, T = ReqwestTransport, D = TokioDelay> {
    client: PredictionClient<T, D>,
    store: Arc<B>,
}

impl<B: BlobStore, T: HttpTransport, D: Delay> VoiceClone<B, T, D> {
    pub fn new(client: PredictionClient<T, D>, store: Arc<B>) -> Self {
        Self { client, store }
    }

    pub async fn clone_voice(&self, sample: VoiceSample, cancel: &CancelToken) -> Result<Artifact> {
        check_sample(&sample.audio)?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let file_name = sample_file_name(&sample.name, Utc::now());
        let url = self.store.upload(sample.audio, &file_name).await?;
        info!(file_name = %file_name, voice = %sample.name, "hosted voice sample");

        let spec = JobSpec::voice_clone(VoiceCloneInput::from_url(url));
        let job = self.client.run(&spec, cancel).await?;
        let job_id = job.id().to_string();

        job.into_outcome().inspect_err(|e| {
            warn!(job_id = %job_id, file_name = %file_name, error = %e, "voice cloning failed");
        })
    }
}

impl<B: BlobStore, T: HttpTransport, D: Delay> Workflow for VoiceClone<B, T, D> {
    type Input = VoiceSample;

    const KIND: JobKind = JobKind::VoiceClone;

    async fn run(&self, input: VoiceSample, cancel: CancelToken) -> Result<Artifact> {
        self.clone_voice(input, &cancel).await
    }
}

/// Reject samples the API would refuse, before spending upload bandwidth.
pub fn check_sample(audio: &[u8]) -> Result<()> {
    if audio.is_empty() {
        return Err(Error::InvalidAudioData);
    }
    if audio.len() > MAX_SAMPLE_BYTES {
        return Err(Error::AudioTooLarge {
            size: audio.len(),
            limit: MAX_SAMPLE_BYTES,
        });
    }
    Ok(())
}

/// Storage name for a sample: the voice name with whitespace turned into
/// `_` and other non-alphanumerics dropped, plus the submission time so
/// repeated attempts with one name never collide.
pub fn sample_file_name(voice_name: &str, at: DateTime<Utc>) -> String {
    let mut stem: String = voice_name
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    if stem.trim_matches('_').is_empty() {
        stem = "voice".to_string();
    }

    format!("{stem}_{}.wav", at.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn file_name_is_sanitized_and_timestamped() {
        assert_eq!(sample_file_name("Grandma's Voice!", at()), "Grandmas_Voice_1700000000.wav");
        assert_eq!(sample_file_name("  Dad  ", at()), "Dad_1700000000.wav");
    }

    #[test]
    fn file_name_falls_back_when_nothing_is_left() {
        assert_eq!(sample_file_name("???", at()), "voice_1700000000.wav");
        assert_eq!(sample_file_name("", at()), "voice_1700000000.wav");
    }

    #[test]
    fn sample_limits() {
        assert!(matches!(check_sample(&[]), Err(Error::InvalidAudioData)));
        assert!(check_sample(&[0u8; 16]).is_ok());
        assert!(check_sample(&vec![0u8; MAX_SAMPLE_BYTES]).is_ok());
        assert!(matches!(
            check_sample(&vec![0u8; MAX_SAMPLE_BYTES + 1]),
            Err(Error::AudioTooLarge { limit: MAX_SAMPLE_BYTES, .. })
        ));
    }
}

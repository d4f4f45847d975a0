//! Immutable descriptions of jobs ready for submission.
use crate::job_kind::JobKind;
use crate::speech_options::{Channel, Emotion, LanguageBoost};
use crate::voice_id::VoiceId;
use serde::{Deserialize, Serialize};

/// Similarity target the cloning model aims for.
pub const DEFAULT_CLONE_ACCURACY: f32 = 0.7;

/// Input fields of a speech synthesis prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechInput {
    pub text: String,
    pub voice_id: VoiceId,
    pub emotion: Emotion,
    pub channel: Channel,
    pub language_boost: LanguageBoost,
}

impl SpeechInput {
    pub fn new(text: impl Into<String>, voice_id: impl Into<VoiceId>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            emotion: Emotion::default(),
            channel: Channel::default(),
            language_boost: LanguageBoost::default(),
        }
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = emotion;
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_language_boost(mut self, language_boost: LanguageBoost) -> Self {
        self.language_boost = language_boost;
        self
    }
}

/// Input fields of a voice cloning prediction.
///
/// `voice_file` must be a URL the prediction API can fetch; raw audio is
/// uploaded to the blob store before this is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCloneInput {
    pub voice_file: String,
    pub accuracy: f32,
    pub need_noise_reduction: bool,
    pub need_volume_normalization: bool,
}

impl VoiceCloneInput {
    pub fn from_url(voice_file: impl Into<String>) -> Self {
        Self {
            voice_file: voice_file.into(),
            accuracy: DEFAULT_CLONE_ACCURACY,
            need_noise_reduction: false,
            need_volume_normalization: false,
        }
    }
}

/// Kind-specific payload of a [`JobSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobPayload {
    SpeechSynthesis(SpeechInput),
    VoiceClone(VoiceCloneInput),
}

/// One remote job to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    payload: JobPayload,
}

impl JobSpec {
    pub fn speech(input: SpeechInput) -> Self {
        Self {
            payload: JobPayload::SpeechSynthesis(input),
        }
    }

    pub fn voice_clone(input: VoiceCloneInput) -> Self {
        Self {
            payload: JobPayload::VoiceClone(input),
        }
    }

    pub fn kind(&self) -> JobKind {
        match self.payload {
            JobPayload::SpeechSynthesis(_) => JobKind::SpeechSynthesis,
            JobPayload::VoiceClone(_) => JobKind::VoiceClone,
        }
    }

    pub fn payload(&self) -> &JobPayload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn speech_payload_uses_api_field_names() {
        let spec = JobSpec::speech(SpeechInput::new("Hello world", "Wise_Woman"));
        assert_eq!(spec.kind(), JobKind::SpeechSynthesis);
        assert_eq!(
            serde_json::to_value(spec.payload()).unwrap(),
            json!({
                "text": "Hello world",
                "voice_id": "Wise_Woman",
                "emotion": "auto",
                "channel": "mono",
                "language_boost": "Automatic",
            })
        );
    }

    #[test]
    fn clone_payload_carries_fixed_tuning() {
        let spec = JobSpec::voice_clone(VoiceCloneInput::from_url("https://cdn.example/a.wav"));
        assert_eq!(spec.kind(), JobKind::VoiceClone);
        let value = serde_json::to_value(spec.payload()).unwrap();
        assert_eq!(value["voice_file"], "https://cdn.example/a.wav");
        assert_eq!(value["need_noise_reduction"], false);
        assert_eq!(value["need_volume_normalization"], false);
        assert!((value["accuracy"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }
}

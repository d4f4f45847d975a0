//! Output of a successful job.
use crate::voice_id::VoiceId;
use serde::{Deserialize, Serialize};

/// Kind-specific result of a job that reached `Succeeded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Artifact {
    /// Fetchable URL of synthesized audio.
    AudioUrl { url: String },
    /// Identifier of a freshly cloned voice, with an optional preview clip.
    VoiceId {
        voice_id: VoiceId,
        preview_url: Option<String>,
    },
}

impl Artifact {
    pub fn audio_url(url: impl Into<String>) -> Self {
        Self::AudioUrl { url: url.into() }
    }

    pub fn voice(voice_id: impl Into<VoiceId>, preview_url: Option<String>) -> Self {
        Self::VoiceId {
            voice_id: voice_id.into(),
            preview_url,
        }
    }
}

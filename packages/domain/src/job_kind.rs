//! The two kinds of remote job Voicely submits.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobKind {
    /// Text to speech with a preset or cloned voice.
    SpeechSynthesis,
    /// Voice cloning from a hosted audio sample.
    VoiceClone,
}

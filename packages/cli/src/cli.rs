//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use voicely_domain::{Channel, Emotion, JobKind, LanguageBoost, PresetVoice, VoiceId};

#[derive(Parser, Debug)]
#[command(name = "voicely")]
#[command(about = "Synthesize speech and clone voices with a remote prediction API")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Turn text into speech and print the audio URL
    Speak {
        /// Text to synthesize
        #[arg(long)]
        text: String,

        /// Preset voice id or name, or the id of a cloned voice
        #[arg(long, default_value = "Wise_Woman")]
        voice: String,

        #[arg(long, default_value_t = Emotion::Auto)]
        emotion: Emotion,

        #[arg(long, default_value_t = Channel::Mono)]
        channel: Channel,

        /// Language hint, e.g. `English` or `Chinese,Yue`
        #[arg(long, default_value_t = LanguageBoost::Automatic)]
        language_boost: LanguageBoost,
    },

    /// Clone a voice from an audio sample and print the new voice id
    Clone {
        /// WAV recording of the voice (at most 19 MiB)
        #[arg(long)]
        file: PathBuf,

        /// Name for the new voice
        #[arg(long)]
        name: String,
    },

    /// Show the current state of a submitted job
    Status {
        /// Prediction id returned at submission
        id: String,

        #[arg(long, value_enum, default_value_t = KindArg::Speech)]
        kind: KindArg,
    },

    /// List preset voices
    Voices,

    /// Remove a previously uploaded voice sample from storage
    DeleteSample {
        /// File name as stored, e.g. `Anna_1700000000.wav`
        file_name: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Speech,
    Clone,
}

impl From<KindArg> for JobKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Speech => JobKind::SpeechSynthesis,
            KindArg::Clone => JobKind::VoiceClone,
        }
    }
}

/// Preset names resolve to their ids; anything else is taken as a cloned voice id.
pub fn resolve_voice(voice: &str) -> VoiceId {
    match PresetVoice::from_name(voice) {
        Some(preset) => preset.into(),
        None => VoiceId::new(voice.trim()),
    }
}

//! # Voicely Domain
//!
//! Shared value types for Voicely's remote prediction jobs: what a job is,
//! what it produces, and the voices and options it is configured with.
//!
//! This crate has no I/O. The client, polling loop and workflows live in
//! `voicely_predictions`.

pub mod artifact;
pub mod job_kind;
pub mod job_spec;
pub mod job_status;
pub mod preset_voice;
pub mod speech_options;
pub mod voice_id;

// Re-export core types
pub use artifact::Artifact;
pub use job_kind::JobKind;
pub use job_spec::{DEFAULT_CLONE_ACCURACY, JobPayload, JobSpec, SpeechInput, VoiceCloneInput};
pub use job_status::JobStatus;
pub use preset_voice::{PresetVoice, PresetVoiceInfo};
pub use speech_options::{Channel, Emotion, LanguageBoost};
pub use voice_id::VoiceId;

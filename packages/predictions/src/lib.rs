//! Voicely prediction client
//!
//! Submits speech synthesis and voice cloning jobs to a prediction API,
//! polls them to a terminal status and delivers one result per job.
//!
//! # Usage
//!
//! ```no_run
//! use voicely_predictions::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = PredictionClient::from_env()?;
//!     let speech = SpeechSynthesis::new(client);
//!
//!     let input = SpeechInput::new("Once upon a time", PresetVoice::WiseWoman)
//!         .with_emotion(Emotion::Happy);
//!     let artifact = speech.synthesize(input, &CancelToken::never()).await?;
//!
//!     println!("{artifact:?}");
//!     Ok(())
//! }
//! ```

pub mod blob;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod job;
pub mod orchestrator;
pub mod poll;
pub mod transport;
pub mod workflows;

pub use blob::{BlobStore, FirebaseStorage};
pub use client::PredictionClient;
pub use config::{BlobStoreConfig, PredictionConfig};
pub use error::{Error, Result};
pub use job::{Job, JobHandle};
pub use orchestrator::{JobOrchestrator, JobTicket, ResultSlot, spawn_workflow};
pub use poll::{CancelHandle, CancelToken, Delay, PollPolicy, TokioDelay};
pub use transport::{ClientConfig, HttpTransport, ReqwestTransport};
pub use workflows::{SpeechSynthesis, VoiceClone, VoiceSample, Workflow};

pub mod prelude {
    pub use crate::{
        BlobStore, BlobStoreConfig, CancelToken, Error, FirebaseStorage, JobOrchestrator,
        PredictionClient, PredictionConfig, Result, SpeechSynthesis, VoiceClone, VoiceSample,
    };
    pub use voicely_domain::{
        Artifact, Channel, Emotion, JobKind, JobStatus, LanguageBoost, PresetVoice, SpeechInput,
        VoiceId,
    };
}

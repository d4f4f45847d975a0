//! Workflows that turn caller input into one delivered [`Artifact`].

use crate::error::Result;
use crate::poll::CancelToken;
use std::future::Future;
use voicely_domain::{Artifact, JobKind};

pub mod speech;
pub mod voice_clone;

pub use speech::SpeechSynthesis;
pub use voice_clone::{MAX_SAMPLE_BYTES, VoiceClone, VoiceSample, check_sample, sample_file_name};

/// One end-to-end job: optional hosting, submission, polling, result.
pub trait Workflow: Send + Sync + 'static {
    type Input: Send + 'static;

    const KIND: JobKind;

    fn run(
        &self,
        input: Self::Input,
        cancel: CancelToken,
    ) -> impl Future<Output = Result<Artifact>> + Send;
}

//! Runs workflows in the background and hands back a ticket for the result.
//!
//! Each job gets a oneshot channel wrapped in a [`ResultSlot`]; the first
//! delivery wins and any later one is dropped, so a caller sees exactly one
//! outcome per job.

use crate::blob::BlobStore;
use crate::client::PredictionClient;
use crate::error::{Error, Result};
use crate::poll::{CancelHandle, CancelToken, Delay, TokioDelay};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::workflows::{SpeechSynthesis, VoiceClone, VoiceSample, Workflow};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use voicely_domain::{Artifact, JobKind, SpeechInput};

/// Single-use result channel.
pub struct ResultSlot {
    sender: Mutex<Option<oneshot::Sender<Result<Artifact>>>>,
}

impl ResultSlot {
    pub fn channel() -> (Self, oneshot::Receiver<Result<Artifact>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Deliver an outcome. Returns `false` if something was already delivered.
    pub fn deliver(&self, outcome: Result<Artifact>) -> bool {
        let Some(sender) = self.sender.lock().take() else {
            warn!("ignoring duplicate job result");
            return false;
        };
        if sender.send(outcome).is_err() {
            debug!("job result receiver dropped before delivery");
        }
        true
    }

    pub fn is_delivered(&self) -> bool {
        self.sender.lock().is_none()
    }
}

/// Caller's side of a running job.
///
/// Dropping the ticket cancels the job; keep it alive for as long as the
/// result is wanted.
pub struct JobTicket {
    kind: JobKind,
    receiver: oneshot::Receiver<Result<Artifact>>,
    cancel: CancelHandle,
    finished: bool,
}

impl JobTicket {
    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// Ask the job to stop; it finishes with `Error::Cancelled` at its next
    /// check.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Wait for the job's single outcome.
    pub async fn wait(mut self) -> Result<Artifact> {
        let received = (&mut self.receiver).await;
        self.finished = true;
        match received {
            Ok(outcome) => outcome,
            // the task ended without delivering (panicked or runtime shut down)
            Err(_) => Err(Error::Cancelled),
        }
    }
}

impl Drop for JobTicket {
    fn drop(&mut self) {
        if !self.finished && !self.cancel.is_cancelled() {
            debug!(kind = %self.kind, "job ticket dropped, cancelling job");
            self.cancel.cancel();
        }
    }
}

/// Spawn `workflow` on the current tokio runtime.
pub fn spawn_workflow<W: Workflow>(workflow: Arc<W>, input: W::Input) -> JobTicket {
    let (cancel, token) = CancelToken::pair();
    let (slot, receiver) = ResultSlot::channel();

    tokio::spawn(async move {
        let outcome = workflow.run(input, token).await;
        slot.deliver(outcome);
    });

    JobTicket {
        kind: W::KIND,
        receiver,
        cancel,
        finished: false,
    }
}

/// Entry point for both Voicely job kinds.
pub struct JobOrchestrator<B, T = ReqwestTransport, D = TokioDelay> {
    speech: Arc<SpeechSynthesis<T, D>>,
    voice_clone: Arc<VoiceClone<B, T, D>>,
}

impl<B: BlobStore, T: HttpTransport, D: Delay> JobOrchestrator<B, T, D> {
    pub fn new(client: PredictionClient<T, D>, store: Arc<B>) -> Self {
        Self {
            speech: Arc::new(SpeechSynthesis::new(client.clone())),
            voice_clone: Arc::new(VoiceClone::new(client, store)),
        }
    }

    pub fn synthesize(&self, input: SpeechInput) -> JobTicket {
        spawn_workflow(Arc::clone(&self.speech), input)
    }

    pub fn clone_voice(&self, sample: VoiceSample) -> JobTicket {
        spawn_workflow(Arc::clone(&self.voice_clone), sample)
    }
}

impl<B, T, D> Clone for JobOrchestrator<B, T, D> {
    fn clone(&self) -> Self {
        Self {
            speech: Arc::clone(&self.speech),
            voice_clone: Arc::clone(&self.voice_clone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slot_delivers_only_once() {
        let (slot, receiver) = ResultSlot::channel();
        assert!(!slot.is_delivered());
        assert!(slot.deliver(Ok(Artifact::audio_url("https://cdn.example/first.mp3"))));
        assert!(!slot.deliver(Ok(Artifact::audio_url("https://cdn.example/second.mp3"))));
        assert!(!slot.deliver(Err(Error::Cancelled)));
        assert!(slot.is_delivered());

        let delivered = receiver.await.unwrap().unwrap();
        assert_eq!(delivered, Artifact::audio_url("https://cdn.example/first.mp3"));
    }

    #[tokio::test]
    async fn racing_deliveries_yield_one_winner() {
        let (slot, receiver) = ResultSlot::channel();
        let slot = Arc::new(slot);

        let attempts: Vec<_> = (0..8)
            .map(|i| {
                let slot = Arc::clone(&slot);
                tokio::spawn(async move {
                    slot.deliver(Ok(Artifact::audio_url(format!("https://cdn.example/{i}.mp3"))))
                })
            })
            .collect();

        let mut winners = 0;
        for attempt in attempts {
            if attempt.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert!(receiver.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn dropped_receiver_still_consumes_slot() {
        let (slot, receiver) = ResultSlot::channel();
        drop(receiver);
        assert!(slot.deliver(Err(Error::Cancelled)));
        assert!(!slot.deliver(Err(Error::Cancelled)));
    }
}

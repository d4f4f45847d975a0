mod common;

use common::{MemoryBlobStore, RecordingDelay, Reply, ScriptedTransport, client, json_body};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use voicely_domain::{Artifact, VoiceId};
use voicely_predictions::{CancelToken, Error, VoiceClone, VoiceSample};

#[tokio::test]
async fn hosts_sample_then_delivers_voice_id() {
    let transport = ScriptedTransport::new([
        Reply::prediction("c1", "starting"),
        Reply::prediction("c1", "processing"),
        Reply::ok(json!({
            "id": "c1",
            "status": "succeeded",
            "output": {
                "voice_id": "R8_ABC123",
                "model": "speech-02-hd",
                "preview": "https://x/preview.mp3"
            }
        })),
    ]);
    let delay = RecordingDelay::default();
    let store = Arc::new(MemoryBlobStore::default());
    let clone = VoiceClone::new(client(&transport, delay.clone()), Arc::clone(&store));

    let sample = VoiceSample::new(vec![1u8; 4096], "Grandma Rose");
    let artifact = clone.clone_voice(sample, &CancelToken::never()).await.unwrap();

    assert_eq!(
        artifact,
        Artifact::voice(VoiceId::new("R8_ABC123"), Some("https://x/preview.mp3".to_string()))
    );
    assert_eq!(delay.sleeps(), vec![Duration::from_secs(2)]);

    let uploads = store.uploads();
    assert_eq!(uploads.len(), 1);
    let (file_name, size) = &uploads[0];
    assert!(file_name.starts_with("Grandma_Rose_"));
    assert!(file_name.ends_with(".wav"));
    assert_eq!(*size, 4096);

    let body = json_body(&transport.requests()[0]);
    assert_eq!(body["version"], "minimax/voice-cloning");
    assert_eq!(
        body["input"]["voice_file"],
        format!("https://storage.test/voices/{file_name}")
    );
    assert_eq!(body["input"]["need_noise_reduction"], false);
}

#[tokio::test]
async fn empty_sample_is_rejected_without_io() {
    let transport = ScriptedTransport::new(Vec::new());
    let store = Arc::new(MemoryBlobStore::default());
    let clone = VoiceClone::new(client(&transport, RecordingDelay::default()), Arc::clone(&store));

    let err = clone
        .clone_voice(VoiceSample::new(Vec::<u8>::new(), "Empty"), &CancelToken::never())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidAudioData));
    assert_eq!(store.calls(), 0);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn oversized_sample_is_rejected_without_io() {
    let transport = ScriptedTransport::new(Vec::new());
    let store = Arc::new(MemoryBlobStore::default());
    let clone = VoiceClone::new(client(&transport, RecordingDelay::default()), Arc::clone(&store));

    let audio = vec![0u8; 25 * 1024 * 1024];
    let err = clone
        .clone_voice(VoiceSample::new(audio, "Huge"), &CancelToken::never())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AudioTooLarge { size, .. } if size == 25 * 1024 * 1024));
    assert_eq!(store.calls(), 0);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn upload_failure_skips_submission() {
    let transport = ScriptedTransport::new(Vec::new());
    let store = Arc::new(MemoryBlobStore::failing());
    let clone = VoiceClone::new(client(&transport, RecordingDelay::default()), Arc::clone(&store));

    let err = clone
        .clone_voice(VoiceSample::new(vec![1u8; 16], "Dad"), &CancelToken::never())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UploadFailed(_)));
    assert_eq!(store.calls(), 1);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn malformed_clone_output_is_invalid_response() {
    let transport = ScriptedTransport::new([
        Reply::prediction("c2", "starting"),
        Reply::ok(json!({ "id": "c2", "status": "succeeded", "output": "https://x/not-a-voice" })),
    ]);
    let store = Arc::new(MemoryBlobStore::default());
    let clone = VoiceClone::new(client(&transport, RecordingDelay::default()), store);

    let err = clone
        .clone_voice(VoiceSample::new(vec![1u8; 16], "Mum"), &CancelToken::never())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidResponse(_)));
}

#[tokio::test]
async fn cancelled_clone_never_uploads() {
    let transport = ScriptedTransport::new(Vec::new());
    let store = Arc::new(MemoryBlobStore::default());
    let clone = VoiceClone::new(client(&transport, RecordingDelay::default()), Arc::clone(&store));

    let (handle, token) = CancelToken::pair();
    handle.cancel();
    let err = clone
        .clone_voice(VoiceSample::new(vec![1u8; 16], "Dad"), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(store.calls(), 0);
}

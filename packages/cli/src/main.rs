//! Main entry point for the voicely CLI
//!
//! Credentials and endpoints come from the environment; see
//! `PredictionConfig::from_env` and `BlobStoreConfig::from_env`.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, resolve_voice};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voicely_domain::{Artifact, Channel, Emotion, JobKind, LanguageBoost, PresetVoice, SpeechInput};
use voicely_predictions::{
    BlobStore, BlobStoreConfig, FirebaseStorage, JobHandle, JobTicket, PredictionClient,
    PredictionConfig, ReqwestTransport, SpeechSynthesis, TokioDelay, VoiceClone, VoiceSample,
    spawn_workflow,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Speak {
            text,
            voice,
            emotion,
            channel,
            language_boost,
        } => {
            speak(text, &voice, emotion, channel, language_boost).await?;
        }

        Commands::Clone { file, name } => {
            clone_voice(&file, name).await?;
        }

        Commands::Status { id, kind } => {
            show_status(id, kind.into()).await?;
        }

        Commands::Voices => list_voices(),

        Commands::DeleteSample { file_name } => {
            delete_sample(&file_name).await?;
        }
    }

    Ok(())
}

async fn speak(
    text: String,
    voice: &str,
    emotion: Emotion,
    channel: Channel,
    language_boost: LanguageBoost,
) -> Result<()> {
    let client = PredictionClient::from_env().context("failed to configure prediction client")?;
    let input = SpeechInput::new(text, resolve_voice(voice))
        .with_emotion(emotion)
        .with_channel(channel)
        .with_language_boost(language_boost);

    let ticket = spawn_workflow(Arc::new(SpeechSynthesis::new(client)), input);
    let artifact = wait_or_interrupt(ticket).await.context("speech synthesis failed")?;
    print_artifact(&artifact);
    Ok(())
}

async fn clone_voice(file: &Path, name: String) -> Result<()> {
    let audio = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    info!(file = %file.display(), bytes = audio.len(), "read voice sample");

    let transport = Arc::new(ReqwestTransport::new()?);
    let client = PredictionClient::with_shared_transport(
        PredictionConfig::from_env().context("failed to configure prediction client")?,
        Arc::clone(&transport),
        TokioDelay,
    );
    let store = FirebaseStorage::new(
        BlobStoreConfig::from_env().context("failed to configure sample storage")?,
        transport,
    );

    let workflow = VoiceClone::new(client, Arc::new(store));
    let ticket = spawn_workflow(Arc::new(workflow), VoiceSample::new(audio, name));
    let artifact = wait_or_interrupt(ticket).await.context("voice cloning failed")?;
    print_artifact(&artifact);
    Ok(())
}

async fn show_status(id: String, kind: JobKind) -> Result<()> {
    let client = PredictionClient::from_env().context("failed to configure prediction client")?;
    let job = client.status(&JobHandle::new(id, kind)).await?;

    println!("{} ({}): {}", job.id(), job.kind(), job.status());
    if let Some(artifact) = job.result() {
        print_artifact(artifact);
    }
    if let Some(reason) = job.error_detail() {
        println!("error: {reason}");
    }
    Ok(())
}

fn list_voices() {
    for voice in PresetVoice::all() {
        let info = voice.info();
        println!("{:<20} {:<20} {}", info.id, info.name, info.description);
    }
}

async fn delete_sample(file_name: &str) -> Result<()> {
    let transport = Arc::new(ReqwestTransport::new()?);
    let store = FirebaseStorage::new(
        BlobStoreConfig::from_env().context("failed to configure sample storage")?,
        transport,
    );
    store.delete(file_name).await?;
    println!("deleted {file_name}");
    Ok(())
}

/// Wait for the job; Ctrl-C cancels it and waits for the cancellation to land.
async fn wait_or_interrupt(ticket: JobTicket) -> voicely_predictions::Result<Artifact> {
    let cancel = ticket.cancel_handle();
    let outcome = ticket.wait();
    tokio::pin!(outcome);

    tokio::select! {
        result = &mut outcome => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, cancelling job");
            cancel.cancel();
            outcome.await
        }
    }
}

fn print_artifact(artifact: &Artifact) {
    match artifact {
        Artifact::AudioUrl { url } => println!("{url}"),
        Artifact::VoiceId {
            voice_id,
            preview_url,
        } => {
            println!("{voice_id}");
            if let Some(preview) = preview_url {
                println!("preview: {preview}");
            }
        }
    }
}

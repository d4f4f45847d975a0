//! Explicit configuration for the prediction client and blob store.
//!
//! Nothing reads credentials from globals: callers build a config (directly
//! or via `from_env`) and hand it to the client at construction.

use crate::error::{Error, Result};
use crate::poll::PollPolicy;
use crate::transport::ClientConfig;
use reqwest::Url;
use std::fmt;
use voicely_domain::JobKind;

pub const DEFAULT_BASE_URL: &str = "https://api.replicate.com";
pub const DEFAULT_SPEECH_VERSION: &str = "minimax/speech-02-hd";
pub const DEFAULT_CLONE_VERSION: &str = "minimax/voice-cloning";
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://firebasestorage.googleapis.com";
pub const DEFAULT_STORAGE_FOLDER: &str = "voices";

/// Prediction API settings
#[derive(Clone)]
pub struct PredictionConfig {
    api_key: String,
    pub base_url: Url,
    pub speech_version: String,
    pub clone_version: String,
    pub speech_poll: PollPolicy,
    pub clone_poll: PollPolicy,
    pub http: ClientConfig,
}

impl PredictionConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Configuration("API key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            speech_version: DEFAULT_SPEECH_VERSION.to_string(),
            clone_version: DEFAULT_CLONE_VERSION.to_string(),
            speech_poll: PollPolicy::speech_synthesis(),
            clone_poll: PollPolicy::voice_clone(),
            http: ClientConfig::default(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("VOICELY_API_KEY")
            .or_else(|| lookup("REPLICATE_API_TOKEN"))
            .ok_or_else(|| {
                Error::Configuration(
                    "No prediction API key found. Set VOICELY_API_KEY or REPLICATE_API_TOKEN"
                        .to_string(),
                )
            })?;

        let mut config = Self::new(api_key)?;

        if let Some(base_url) = lookup("VOICELY_API_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(version) = lookup("VOICELY_SPEECH_VERSION") {
            config.speech_version = version;
        }
        if let Some(version) = lookup("VOICELY_CLONE_VERSION") {
            config.clone_version = version;
        }
        if let Some(raw) = lookup("VOICELY_MAX_POLL_ATTEMPTS") {
            let max_attempts = parse_max_attempts(&raw)?;
            config.speech_poll = config.speech_poll.with_max_attempts(max_attempts);
            config.clone_poll = config.clone_poll.with_max_attempts(max_attempts);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_poll_policy(mut self, kind: JobKind, policy: PollPolicy) -> Self {
        match kind {
            JobKind::SpeechSynthesis => self.speech_poll = policy,
            JobKind::VoiceClone => self.clone_poll = policy,
        }
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Model version submitted for a job kind
    pub fn version_for(&self, kind: JobKind) -> &str {
        match kind {
            JobKind::SpeechSynthesis => &self.speech_version,
            JobKind::VoiceClone => &self.clone_version,
        }
    }

    pub fn poll_policy(&self, kind: JobKind) -> PollPolicy {
        match kind {
            JobKind::SpeechSynthesis => self.speech_poll,
            JobKind::VoiceClone => self.clone_poll,
        }
    }
}

impl fmt::Debug for PredictionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url.as_str())
            .field("speech_version", &self.speech_version)
            .field("clone_version", &self.clone_version)
            .field("speech_poll", &self.speech_poll)
            .field("clone_poll", &self.clone_poll)
            .finish()
    }
}

/// Blob store (Firebase Storage) settings
#[derive(Clone)]
pub struct BlobStoreConfig {
    pub bucket: String,
    pub folder: String,
    pub base_url: Url,
    auth_token: Option<String>,
}

impl BlobStoreConfig {
    pub fn new(bucket: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        if bucket.trim().is_empty() {
            return Err(Error::Configuration("storage bucket is empty".to_string()));
        }

        Ok(Self {
            bucket,
            folder: DEFAULT_STORAGE_FOLDER.to_string(),
            base_url: parse_base_url(DEFAULT_STORAGE_BASE_URL)?,
            auth_token: None,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bucket = lookup("VOICELY_STORAGE_BUCKET").ok_or_else(|| {
            Error::Configuration("No storage bucket found. Set VOICELY_STORAGE_BUCKET".to_string())
        })?;

        let mut config = Self::new(bucket)?;
        if let Some(folder) = lookup("VOICELY_STORAGE_FOLDER") {
            config.folder = folder;
        }
        if let Some(base_url) = lookup("VOICELY_STORAGE_BASE_URL") {
            config.base_url = parse_base_url(&base_url)?;
        }
        config.auth_token = lookup("VOICELY_STORAGE_TOKEN");

        Ok(config)
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Object path of an uploaded file: `<folder>/<file_name>`
    pub fn object_path(&self, file_name: &str) -> String {
        let folder = self.folder.trim_matches('/');
        if folder.is_empty() {
            file_name.to_string()
        } else {
            format!("{folder}/{file_name}")
        }
    }
}

impl fmt::Debug for BlobStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobStoreConfig")
            .field("bucket", &self.bucket)
            .field("folder", &self.folder)
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &self.auth_token.as_deref().map(redact))
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = raw
        .parse::<Url>()
        .map_err(|e| Error::Configuration(format!("failed to parse base URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Configuration(format!("'{raw}' is not an http(s) base URL")));
    }
    Ok(url)
}

/// `0` means unbounded
fn parse_max_attempts(raw: &str) -> Result<Option<u32>> {
    let attempts: u32 = raw.trim().parse().map_err(|e| {
        Error::Configuration(format!("VOICELY_MAX_POLL_ATTEMPTS '{raw}' is not a count: {e}"))
    })?;
    Ok((attempts > 0).then_some(attempts))
}

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}... (length: {})", secret.len())
}

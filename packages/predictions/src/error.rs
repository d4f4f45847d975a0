use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    /// The request failed before any response arrived.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// The body matched neither the prediction shape nor the error shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The API answered with `{"detail": ...}`.
    #[error("rejected by prediction API: {0}")]
    RemoteRejected(String),
    /// The job reached the `failed` status.
    #[error("{0}")]
    RemoteJobFailed(String),
    #[error("audio data is empty")]
    InvalidAudioData,
    #[error("audio is {size} bytes, limit is {limit} bytes")]
    AudioTooLarge { size: usize, limit: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("job did not finish after {attempts} polls")]
    Timeout { attempts: u32 },
    #[error("job was cancelled")]
    Cancelled,
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport(source.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(Box::new(error))
    }
}

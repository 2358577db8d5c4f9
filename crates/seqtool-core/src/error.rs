use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not find a handler for {0}")]
    HandlerNotFound(String),

    #[error("No files to extract in {0}")]
    EmptyArchive(String),

    #[error("Couldn't find default keysound entries for {0}")]
    DefaultLookupFailed(String),

    #[error("Decode error at offset {offset:#x}: {message}")]
    Decode { offset: usize, message: String },

    #[error("Invalid chart: {0}")]
    InvalidChart(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{program} failed: {message}")]
    Tool { program: String, message: String },

    #[error("Task '{0}' panicked")]
    TaskPanicked(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Audio error: {0}")]
    Audio(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn decode(offset: usize, message: impl Into<String>) -> Self {
        Error::Decode {
            offset,
            message: message.into(),
        }
    }
}

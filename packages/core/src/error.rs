use thiserror::Error;

/// Unified application error.
///
/// Decode failures are per-record and normally skipped by the caller;
/// everything else is surfaced to the presentation layer as a message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to decode {collection}/{id}: {message}")]
    Decode {
        collection: String,
        id: String,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn decode(
        collection: impl Into<String>,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            collection: collection.into(),
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Result alias used across the crate.
pub type AppResult<T> = Result<T, AppError>;

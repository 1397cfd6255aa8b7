use std::io;

/// Errors that can occur during run-in-terminal operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid match pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for run-in-terminal operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for sanaphor.

use thiserror::Error;

/// Result type for sanaphor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sanaphor operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input stream could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(String),

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] sanaphor_core::Error),

    /// Error from the entity linker.
    #[error(transparent)]
    Linker(#[from] sanaphor_linker::Error),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

//! Error types for the entity linker.

use thiserror::Error;

/// Result type for linker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for linker operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error while reading an index file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An index file or input row is malformed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}

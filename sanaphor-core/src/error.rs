//! Error types for sanaphor-core.

use thiserror::Error;

/// Result type for sanaphor-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sanaphor-core operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Prefix the message with the 1-based input line it came from.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::InvalidInput(msg) => Self::InvalidInput(format!("line {}: {}", line, msg)),
            Self::Parse(msg) => Self::Parse(format!("line {}: {}", line, msg)),
        }
    }
}

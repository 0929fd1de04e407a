//! Error types for the typography engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engine
///
/// Malformed markup, unusual Unicode and unhyphenatable words are not errors:
/// those inputs come back unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// No pattern data for the language or any of its fallback prefixes
    #[error("no pattern data for language '{code}'")]
    DataNotFound {
        /// The language code that was requested
        code: String,
    },

    /// A caller-supplied option is outside its valid domain
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// A data file exists but could not be compiled
    #[error("invalid pattern data for '{code}': {reason}")]
    InvalidData {
        /// Language code of the offending data
        code: String,
        /// What was wrong with it
        reason: String,
    },

    /// Input handed to the API is not usable text
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A file could not be read
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid_data(code: &str, reason: impl Into<String>) -> Self {
        Error::InvalidData {
            code: code.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

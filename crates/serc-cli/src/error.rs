//! Error types for serc-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for serc-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in serc-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from serc-content
    #[error(transparent)]
    Content(#[from] serc_content::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Filesystem error with the path that caused it
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Input that is not valid JSON
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

//! Error types for serc-content.

use std::path::{Path, PathBuf};

use crate::section::Section;

/// Result type alias for serc-content operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing, or persisting site content.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A baseline document could not be retrieved or parsed.
    #[error("{message}")]
    Load {
        /// Section whose retrieval failed
        section: Section,
        /// Human-readable description, including the source location
        message: String,
    },

    /// A section name outside the fixed set was used.
    #[error("Unknown content section: '{0}'")]
    UnknownSection(String),

    /// An operation was called in a state that does not permit it.
    #[error("Cannot {operation} while content is {state}")]
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
        /// Rendered state at the time of the call
        state: String,
    },

    /// A document does not match the shape expected for its section.
    #[error("Invalid {section} content: {message}")]
    Schema {
        /// Section being validated
        section: Section,
        /// What did not match
        message: String,
    },

    /// The durable key-value store rejected a read or write.
    #[error("Storage error for key '{key}': {message}")]
    Storage {
        /// Storage key involved
        key: String,
        /// What went wrong
        message: String,
    },

    /// Filesystem error with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The admin session is not authorized for a mutating operation.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// A confirmation token was not issued, or was already used.
    #[error("Unknown or expired confirmation token: {0}")]
    UnknownConfirmation(String),

    /// No managed image with the given id exists.
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    /// Waiting for the content service timed out.
    #[error("Content not ready after {seconds:.1}s (state: {state})")]
    Timeout {
        /// How long we waited
        seconds: f64,
        /// State when the wait gave up
        state: String,
    },
}

impl Error {
    /// Creates a load error for a section.
    pub fn load<S: Into<String>>(section: Section, message: S) -> Self {
        Error::Load {
            section,
            message: message.into(),
        }
    }

    /// Creates a schema error for a section.
    pub fn schema<S: Into<String>>(section: Section, message: S) -> Self {
        Error::Schema {
            section,
            message: message.into(),
        }
    }

    /// Creates a storage error for a key.
    pub fn storage<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Error::Storage {
            key: key.into(),
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

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid-state error.
    pub fn invalid_state(operation: &'static str, state: impl ToString) -> Self {
        Error::InvalidState {
            operation,
            state: state.to_string(),
        }
    }

    /// Returns `true` if this error came from baseline retrieval.
    ///
    /// Schema mismatches found while loading are reported as load failures
    /// by the loader, so they are covered here as well.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Error::Load { .. })
    }

    /// Returns `true` if this error came from durable override storage.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Error::Storage { .. } | Error::Io { .. })
    }
}

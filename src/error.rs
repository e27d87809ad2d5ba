//! Error types for the launcher.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the launcher library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("item {name:?} is missing required field {field:?}")]
    MissingField { name: String, field: &'static str },

    #[error("no installed application or file found for {name:?}")]
    ItemNotFound { name: String },

    #[error("unrecognized item type: {0}")]
    UnknownItemKind(String),

    #[error("file selection failed: {0}")]
    Dialog(String),

    #[error("tray error: {0}")]
    Tray(String),

    #[error("unsupported environment: {0}")]
    Unsupported(String),
}

impl Error {
    /// Wrap an IO error with the path it occurred at.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

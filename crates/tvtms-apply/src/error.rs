#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("failed to {operation} file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse verse pool {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid verse pool row {row} in {path}: {message}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },
}

impl ApplyError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApplyError>;

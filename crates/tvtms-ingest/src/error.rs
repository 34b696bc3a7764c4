#![deny(unsafe_code)]

//! Error types for TVTMS file ingestion.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input carries no `#DataStart(Expanded)` section.
    #[error("no #DataStart(Expanded) section in {source_id}")]
    MissingDataSection { source_id: String },

    /// The data section could not be split into records.
    #[error("failed to parse data section of {source_id}: {message}")]
    Malformed { source_id: String, message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;

#![deny(unsafe_code)]

pub mod error;
pub mod reader;

pub use crate::error::{IngestError, Result};
pub use crate::reader::{IngestOptions, TvtmsDocument, read_file, read_str};

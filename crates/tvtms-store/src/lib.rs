#![deny(unsafe_code)]

//! Storage and diagnostics collaborators for the mapping pipeline.
//!
//! Stores fully replace their content on every call (idempotent); the
//! diagnostics sink is append-only. Both come in in-memory and on-disk
//! flavors.

pub mod diagnostic_sink;
pub mod error;
pub mod mapping_store;

pub use crate::diagnostic_sink::{DiagnosticSink, JsonlSink, MemorySink};
pub use crate::error::{Result, StoreError};
pub use crate::mapping_store::{
    DOCUMENTATION_FILE, JsonDirStore, MAPPINGS_FILE, MappingStore, MemoryStore, RULES_FILE,
};

//! Append-only diagnostics collaborators.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tvtms_model::Diagnostic;

use crate::error::{Result, StoreError};

/// Append-only sink for parse and processing diagnostics.
///
/// Advisory only; logging never blocks or rewrites the pipeline's output.
pub trait DiagnosticSink {
    fn log(&mut self, diagnostic: &Diagnostic) -> Result<()>;

    fn log_all(&mut self, diagnostics: &[Diagnostic]) -> Result<()> {
        for diagnostic in diagnostics {
            self.log(diagnostic)?;
        }
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub diagnostics: Vec<Diagnostic>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for MemorySink {
    fn log(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.diagnostics.push(diagnostic.clone());
        Ok(())
    }
}

/// One JSON object per line, appended to a log file.
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    file: File,
}

impl JsonlSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::io("create directory for", parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io("open", &path, e))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticSink for JsonlSink {
    fn log(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        let line = serde_json::to_string(diagnostic).map_err(|e| StoreError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;
        writeln!(self.file, "{}", line).map_err(|e| StoreError::io("append to", &self.path, e))?;
        Ok(())
    }
}

//! Processing statistics.

use std::collections::BTreeMap;

use serde::Serialize;
use tvtms_model::Diagnostic;

/// Counters accumulated over one document run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    /// Data rows seen inside the data section.
    pub rows_seen: usize,
    /// Rows lacking a source type, standard ref, or action. Expected blank
    /// rows, counted but never diagnosed.
    pub rows_skipped: usize,
    pub section_lines: usize,
    /// Mappings that passed validation.
    pub mappings_built: usize,
    pub mappings_rejected: usize,
    pub rules_built: usize,
    pub documentation_built: usize,
    pub diagnostics: usize,
    pub diagnostics_by_kind: BTreeMap<String, usize>,
}

impl PipelineStats {
    pub fn record_diagnostics(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            *self
                .diagnostics_by_kind
                .entry(diagnostic.kind.as_str().to_string())
                .or_insert(0) += 1;
        }
        self.diagnostics += diagnostics.len();
    }
}

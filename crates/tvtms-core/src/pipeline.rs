//! The row-processing pipeline.
//!
//! Rows are folded sequentially in file order because of the one genuine
//! serialization hazard in the format: verse-only and chapter-only tokens
//! resolve against the most recently seen explicit book on a prior row.
//! Everything else per row is pure.

use anyhow::Context;
use tracing::{debug, info};
use tvtms_ingest::TvtmsDocument;
use tvtms_model::{Diagnostic, DiagnosticKind, Documentation, Mapping, Rule};
use tvtms_parse::ParseContext;
use tvtms_standards::VerseCounts;
use tvtms_store::{DiagnosticSink, MappingStore};
use tvtms_validate::{Severity, validate_documentation, validate_mapping, validate_rule};

use crate::builder::{BuildOutcome, build_row, build_section_line};
use crate::stats::PipelineStats;

/// Everything a document run produced, before storage.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub source_id: String,
    /// sha256 of the raw input text, lowercase hex.
    pub fingerprint: String,
    pub mappings: Vec<Mapping>,
    pub rules: Vec<Rule>,
    pub documentation: Vec<Documentation>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: PipelineStats,
}

/// Fold every data row through one shared context, expand every section
/// line, then gate the built mappings through validation.
pub fn process_document(document: &TvtmsDocument, counts: &VerseCounts) -> ProcessOutcome {
    let mut collected = BuildOutcome::default();
    let mut stats = PipelineStats::default();
    let mut ctx = ParseContext::new();

    stats.rows_seen = document.rows.len();
    for row in &document.rows {
        if !row.is_processable() {
            stats.rows_skipped += 1;
            continue;
        }
        collected.merge(build_row(row, &mut ctx));
    }

    stats.section_lines = document.section_ranges.len();
    for line in &document.section_ranges {
        collected.merge(build_section_line(line, counts));
    }

    // Auxiliary records are kept even when flagged; their issues are
    // warnings, logged but not fatal.
    for rule in &collected.rules {
        for issue in validate_rule(rule) {
            collected.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ValidationFailed,
                rule.row_id.to_hex(),
                format!("{} {}", issue.code(), issue),
            ));
        }
    }
    for documentation in &collected.documentation {
        for issue in validate_documentation(documentation) {
            collected.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ValidationFailed,
                documentation.row_id.to_hex(),
                format!("{} {}", issue.code(), issue),
            ));
        }
    }

    // Validation gate: invalid mappings never reach the store; each leaves
    // a diagnostic naming its issues instead.
    let mut accepted = Vec::with_capacity(collected.mappings.len());
    for mapping in collected.mappings {
        let issues = validate_mapping(&mapping);
        if issues.iter().all(|issue| issue.severity() != Severity::Error) {
            accepted.push(mapping);
        } else {
            stats.mappings_rejected += 1;
            let rendered: Vec<String> = issues
                .iter()
                .map(|issue| format!("{} {}", issue.code(), issue))
                .collect();
            collected.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ValidationFailed,
                mapping.row_id.to_hex(),
                rendered.join("; "),
            ));
        }
    }

    stats.mappings_built = accepted.len();
    stats.rules_built = collected.rules.len();
    stats.documentation_built = collected.documentation.len();
    stats.record_diagnostics(&collected.diagnostics);

    info!(
        source = document.source_id.as_str(),
        mappings = stats.mappings_built,
        rejected = stats.mappings_rejected,
        diagnostics = stats.diagnostics,
        "document processed"
    );

    ProcessOutcome {
        source_id: document.source_id.clone(),
        fingerprint: document.fingerprint.clone(),
        mappings: accepted,
        rules: collected.rules,
        documentation: collected.documentation,
        diagnostics: collected.diagnostics,
        stats,
    }
}

/// Report of one persisted run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreReport {
    pub mappings_stored: usize,
    pub rules_stored: usize,
    pub documentation_stored: usize,
    pub diagnostics_logged: usize,
}

/// Push an outcome into its collaborators. The store replaces wholesale;
/// the sink appends.
pub fn store_outcome(
    outcome: &ProcessOutcome,
    store: &mut dyn MappingStore,
    sink: &mut dyn DiagnosticSink,
) -> anyhow::Result<StoreReport> {
    let mappings_stored = store
        .store_mappings(&outcome.mappings)
        .context("store mappings")?;
    let rules_stored = store.store_rules(&outcome.rules).context("store rules")?;
    let documentation_stored = store
        .store_documentation(&outcome.documentation)
        .context("store documentation")?;
    sink.log_all(&outcome.diagnostics)
        .context("log diagnostics")?;
    debug!(
        mappings_stored,
        rules_stored, documentation_stored, "outcome persisted"
    );
    Ok(StoreReport {
        mappings_stored,
        rules_stored,
        documentation_stored,
        diagnostics_logged: outcome.diagnostics.len(),
    })
}

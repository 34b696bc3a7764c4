use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of diagnostic categories the pipeline can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No grammar rule matched the reference token.
    UnparseableReference,
    /// Book token not found in the catalog.
    UnknownBook,
    /// Verse token needed cleanup (stray `!` or unrecognized decoration).
    MalformedVerse,
    /// Action phrase matched no known mapping type; defaulted to standard.
    UnknownMappingType,
    /// NoteMarker matched no known category; defaulted to none.
    UnknownCategory,
    /// Compound reference; only the first alternative was kept.
    DroppedAlternate,
    /// Source and target ranges expanded to different lengths.
    RangeMismatch,
    /// Range endpoints arrived in reverse canonical order and were swapped.
    ReversedRange,
    /// Cross-chapter range with a lettered endpoint cannot be enumerated.
    LetterChapterRange,
    /// Several unconsumed source rows matched one mapping; first was used.
    AmbiguousSource,
    /// Mapping rejected by validation and excluded from storage.
    ValidationFailed,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnparseableReference => "unparseable_reference",
            DiagnosticKind::UnknownBook => "unknown_book",
            DiagnosticKind::MalformedVerse => "malformed_verse",
            DiagnosticKind::UnknownMappingType => "unknown_mapping_type",
            DiagnosticKind::UnknownCategory => "unknown_category",
            DiagnosticKind::DroppedAlternate => "dropped_alternate",
            DiagnosticKind::RangeMismatch => "range_mismatch",
            DiagnosticKind::ReversedRange => "reversed_range",
            DiagnosticKind::LetterChapterRange => "letter_chapter_range",
            DiagnosticKind::AmbiguousSource => "ambiguous_source",
            DiagnosticKind::ValidationFailed => "validation_failed",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One durable diagnostic record.
///
/// Advisory only: diagnostics explain gaps in the output, they never stop
/// the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The offending input fragment, verbatim.
    pub input: String,
    pub message: String,
    /// RFC 3339.
    pub timestamp: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Parse the timestamp back out.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_carries_parseable_timestamp() {
        let diag = Diagnostic::new(DiagnosticKind::UnknownBook, "Xyz.1:1", "no such book");
        assert!(diag.timestamp().is_some());
        assert_eq!(diag.kind.as_str(), "unknown_book");
    }
}

//! Mapping construction from raw rows and section lines.

use tracing::warn;
use tvtms_model::{
    Category, Diagnostic, DiagnosticKind, Documentation, Mapping, MappingType, RawRow, Reference,
    Rule, SectionRangeLine, Tradition,
};
use tvtms_parse::{ParseContext, parse};
use tvtms_standards::VerseCounts;

use crate::expander::{expand, parse_range_expression};

/// Everything one data row (or one section line) produced.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub mappings: Vec<Mapping>,
    pub rules: Vec<Rule>,
    pub documentation: Vec<Documentation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutcome {
    pub fn merge(&mut self, other: BuildOutcome) {
        self.mappings.extend(other.mappings);
        self.rules.extend(other.rules);
        self.documentation.extend(other.documentation);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Build the mappings of one data row.
///
/// The context book is updated by the source reference first, then the
/// standard reference, before the next row sees the context.
pub fn build_row(row: &RawRow, ctx: &mut ParseContext) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();

    let (Some(source_type), Some(standard_ref), Some(action)) =
        (&row.source_type, &row.standard_ref, &row.action)
    else {
        return outcome;
    };
    let Ok(source_tradition) = Tradition::new(source_type.as_str()) else {
        return outcome;
    };

    let (source_refs, had_source_cell) = match &row.source_ref {
        Some(raw) => {
            let parsed = parse(raw, ctx);
            outcome.diagnostics.extend(parsed.diagnostics);
            (parsed.refs, true)
        }
        None => (Vec::new(), false),
    };
    let parsed = parse(standard_ref, ctx);
    outcome.diagnostics.extend(parsed.diagnostics);
    let target_refs = parsed.refs;

    let mapping_type = match MappingType::recognize(action) {
        Some(mapping_type) => mapping_type,
        None => {
            warn!(action = action.as_str(), "unrecognized action phrase; defaulting to standard");
            outcome.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnknownMappingType,
                action.as_str(),
                "unrecognized action phrase; defaulted to standard",
            ));
            MappingType::Standard
        }
    };
    let category = match &row.note_marker {
        None => Category::None,
        Some(marker) => match Category::recognize(marker) {
            Some(category) => category,
            None => {
                warn!(marker = marker.as_str(), "note marker is not a recognized category");
                outcome.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnknownCategory,
                    marker.as_str(),
                    "note marker is not a recognized category; defaulted to none",
                ));
                Category::None
            }
        },
    };

    // Auxiliary records are attached to the row itself, whether or not any
    // mapping comes out of it.
    for content in [&row.note_a, &row.note_b].into_iter().flatten() {
        outcome.documentation.push(Documentation {
            row_id: row.row_id,
            tradition: source_tradition.clone(),
            content: content.clone(),
        });
    }
    if let Some(tests) = &row.tests {
        outcome.rules.push(Rule {
            row_id: row.row_id,
            tradition: source_tradition.clone(),
            content: tests.clone(),
        });
    }

    // A marker-only source names a manuscript witness, not a location; the
    // mapping it yields has a designed-absent source.
    let marker_only_source = source_refs.len() == 1 && source_refs[0].is_marker_only();

    let pairs: Vec<(Option<&Reference>, &Reference)> = if !had_source_cell || marker_only_source {
        target_refs.iter().map(|target| (None, target)).collect()
    } else if source_refs.is_empty() {
        // The source cell was there but nothing parsed; its diagnostics
        // already tell the story. No mappings from this row.
        Vec::new()
    } else {
        if source_refs.len() != target_refs.len() && !target_refs.is_empty() {
            outcome.diagnostics.push(Diagnostic::new(
                DiagnosticKind::RangeMismatch,
                format!(
                    "{} -> {}",
                    row.source_ref.as_deref().unwrap_or(""),
                    standard_ref
                ),
                format!(
                    "source expands to {} references, standard to {}; zipped to the shorter side",
                    source_refs.len(),
                    target_refs.len()
                ),
            ));
        }
        source_refs
            .iter()
            .zip(target_refs.iter())
            .map(|(source, target)| (Some(source), target))
            .collect()
    };

    let notes = combined_notes(row);
    for (source, target) in pairs {
        outcome.mappings.push(Mapping {
            row_id: row.row_id,
            source_tradition: source_tradition.clone(),
            target_tradition: Tradition::standard(),
            source_book: source.and_then(|s| s.book.clone()),
            source_chapter: source.and_then(|s| s.chapter),
            source_verse: source.and_then(|s| s.verse),
            source_subverse: source.and_then(|s| s.subverse.clone()),
            target_book: target.book.clone(),
            target_chapter: target.chapter,
            target_verse: target.verse,
            target_subverse: target.subverse.clone(),
            mapping_type,
            category,
            notes: notes.clone(),
            source_range_note: source.and_then(|s| s.range_note.clone()),
            target_range_note: target.range_note.clone(),
            note_marker: row.note_marker.clone(),
            ancient_versions: row.ancient_versions.clone(),
            action: action.clone(),
        });
    }

    outcome
}

/// Build one mapping per (tradition, expanded verse) of a section line.
pub fn build_section_line(line: &SectionRangeLine, counts: &VerseCounts) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();

    let (endpoints, diagnostics) = parse_range_expression(&line.range, counts);
    outcome.diagnostics.extend(diagnostics);
    let Some((start, end)) = endpoints else {
        return outcome;
    };

    let expansion = expand(&start, &end, counts);
    outcome.diagnostics.extend(expansion.diagnostics);

    let range_note = format!("Part of range {}", line.range);
    for raw_tradition in &line.traditions {
        let Ok(tradition) = Tradition::new(raw_tradition.as_str()) else {
            continue;
        };
        for (source, target) in &expansion.pairs {
            outcome.mappings.push(Mapping {
                row_id: line.row_id,
                source_tradition: tradition.clone(),
                target_tradition: Tradition::standard(),
                source_book: source.book.clone(),
                source_chapter: source.chapter,
                source_verse: source.verse,
                source_subverse: source.subverse.clone(),
                target_book: target.book.clone(),
                target_chapter: target.chapter,
                target_verse: target.verse,
                target_subverse: target.subverse.clone(),
                mapping_type: MappingType::SectionRange,
                category: Category::None,
                notes: None,
                source_range_note: Some(range_note.clone()),
                target_range_note: Some(range_note.clone()),
                note_marker: None,
                ancient_versions: None,
                action: String::new(),
            });
        }
    }
    outcome
}

fn combined_notes(row: &RawRow) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(a) = &row.note_a {
        parts.push(a.as_str());
    }
    if let Some(b) = &row.note_b {
        parts.push(b.as_str());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvtms_model::RowId;

    fn raw_row(source_ref: Option<&str>, standard_ref: &str, action: &str) -> RawRow {
        RawRow {
            row_id: RowId::from_first_16_bytes_of_sha256([9u8; 32]),
            row_number: 1,
            source_type: Some("Latin".to_string()),
            source_ref: source_ref.map(str::to_string),
            standard_ref: Some(standard_ref.to_string()),
            action: Some(action.to_string()),
            note_marker: None,
            note_a: None,
            note_b: None,
            ancient_versions: None,
            tests: None,
        }
    }

    #[test]
    fn merged_prev_with_opt_marker() {
        let mut row = raw_row(Some("Psa.142:1"), "Psa.142:2", "MergedPrev verse");
        row.note_marker = Some("Opt.".to_string());

        let mut ctx = ParseContext::new();
        let outcome = build_row(&row, &mut ctx);

        assert_eq!(outcome.mappings.len(), 1);
        let mapping = &outcome.mappings[0];
        assert_eq!(mapping.mapping_type, MappingType::MergePrev);
        assert_eq!(mapping.category, Category::Opt);
        assert_eq!(mapping.target_verse, Some(2));
        assert_eq!(mapping.source_verse, Some(1));
    }

    #[test]
    fn unparseable_standard_ref_yields_no_mappings() {
        let row = raw_row(Some("Gen.1:1"), "not a reference", "Keep verse");
        let mut ctx = ParseContext::new();
        let outcome = build_row(&row, &mut ctx);

        assert!(outcome.mappings.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].kind,
            DiagnosticKind::UnparseableReference
        );
    }

    #[test]
    fn absent_source_cell_builds_target_only_mappings() {
        let row = raw_row(None, "Gen.1:1", "Missing verse");
        let mut ctx = ParseContext::new();
        let outcome = build_row(&row, &mut ctx);

        assert_eq!(outcome.mappings.len(), 1);
        let mapping = &outcome.mappings[0];
        assert!(!mapping.has_source());
        assert_eq!(mapping.mapping_type, MappingType::Omit);
    }

    #[test]
    fn unequal_expansions_zip_to_the_shorter_side() {
        let row = raw_row(Some("Psa.68:1-3"), "Psa.68:1-2", "Renumber verse");
        let mut ctx = ParseContext::new();
        let outcome = build_row(&row, &mut ctx);

        assert_eq!(outcome.mappings.len(), 2);
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::RangeMismatch)
        );
        assert_eq!(
            outcome.mappings[0].source_range_note.as_deref(),
            Some("Part of range Psa.68:1-3")
        );
    }

    #[test]
    fn marker_only_source_becomes_designed_absent() {
        let row = raw_row(Some("!a"), "Rev.13:17", "Keep verse");
        let mut ctx = ParseContext::new();
        let outcome = build_row(&row, &mut ctx);

        assert_eq!(outcome.mappings.len(), 1);
        assert!(!outcome.mappings[0].has_source());
    }

    #[test]
    fn note_cells_become_documentation_and_rules() {
        let mut row = raw_row(Some("Gen.1:1"), "Gen.1:1", "Keep verse");
        row.note_a = Some("First note".to_string());
        row.note_b = Some("Second note".to_string());
        row.tests = Some("Gen.1:1=Gen.1:1".to_string());

        let mut ctx = ParseContext::new();
        let outcome = build_row(&row, &mut ctx);

        assert_eq!(outcome.documentation.len(), 2);
        assert_eq!(outcome.rules.len(), 1);
        assert_eq!(
            outcome.mappings[0].notes.as_deref(),
            Some("First note; Second note")
        );
    }

    #[test]
    fn unknown_action_defaults_to_standard_with_diagnostic() {
        let row = raw_row(Some("Gen.1:1"), "Gen.1:1", "Frobnicate verse");
        let mut ctx = ParseContext::new();
        let outcome = build_row(&row, &mut ctx);

        assert_eq!(outcome.mappings[0].mapping_type, MappingType::Standard);
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::UnknownMappingType)
        );
    }

    #[test]
    fn section_line_fans_out_per_tradition() {
        let line = SectionRangeLine {
            row_id: RowId::from_first_16_bytes_of_sha256([4u8; 32]),
            row_number: 3,
            range: "Psa.68:1-3".to_string(),
            traditions: vec!["Latin".to_string(), "Greek".to_string()],
        };
        let outcome = build_section_line(&line, VerseCounts::embedded());

        assert_eq!(outcome.mappings.len(), 6);
        let mapping = &outcome.mappings[0];
        assert_eq!(mapping.mapping_type, MappingType::SectionRange);
        assert_eq!(mapping.source_book, mapping.target_book);
        assert_eq!(
            mapping.target_range_note.as_deref(),
            Some("Part of range Psa.68:1-3")
        );
    }
}

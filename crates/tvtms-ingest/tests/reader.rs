use std::path::Path;

use tvtms_ingest::{IngestError, IngestOptions, read_file, read_str};

const SAMPLE: &str = "\
TVTMS - expanded edition
Prose before the start marker never reaches the TSV pass.

#DataStart(Expanded)
'=Latin here means the Vulgate tradition, not the language.
SourceType\tSourceRef\tStandardRef\tAction\tNoteMarker\tReversification Note\tVersification Note\tAncient Versions\tTests
Latin\tPsa.142:Title\tPsa.142:1\tKeep verse\t\tTitleNote\t\t\t
Latin\tPsa.142:1\tPsa.142:2\tRenumber verse\t\t\t\t\t
$Gen.31:55-Gen.32:1\tLatin\tGreek\t
Greek\tRev.13:18(A)\tRev.13:17\tKeep verse\t*\t\tTextB\tLXX\tGen.1:1=Gen.1:1
#DataEnd(Expanded)
Anything after the end marker is ignored.
";

#[test]
fn reads_rows_and_section_ranges() {
    let doc = read_str(SAMPLE, &IngestOptions::new("data/sample.txt")).unwrap();

    assert_eq!(doc.source_id, "data/sample.txt");
    assert_eq!(doc.rows.len(), 3);
    assert_eq!(doc.section_ranges.len(), 1);

    let first = &doc.rows[0];
    assert_eq!(first.row_number, 1);
    assert_eq!(first.source_type.as_deref(), Some("Latin"));
    assert_eq!(first.source_ref.as_deref(), Some("Psa.142:Title"));
    assert_eq!(first.standard_ref.as_deref(), Some("Psa.142:1"));
    assert_eq!(first.action.as_deref(), Some("Keep verse"));
    assert_eq!(first.note_marker, None);
    assert_eq!(first.note_a.as_deref(), Some("TitleNote"));
    assert_eq!(first.note_b, None);
    assert!(first.is_processable());

    let last = &doc.rows[2];
    assert_eq!(last.note_marker.as_deref(), Some("*"));
    assert_eq!(last.note_b.as_deref(), Some("TextB"));
    assert_eq!(last.ancient_versions.as_deref(), Some("LXX"));
    assert_eq!(last.tests.as_deref(), Some("Gen.1:1=Gen.1:1"));
}

#[test]
fn section_lines_keep_their_place_in_the_numbering() {
    let doc = read_str(SAMPLE, &IngestOptions::new("data/sample.txt")).unwrap();

    assert_eq!(doc.rows[0].row_number, 1);
    assert_eq!(doc.rows[1].row_number, 2);
    assert_eq!(doc.section_ranges[0].row_number, 3);
    assert_eq!(doc.rows[2].row_number, 4);

    let range = &doc.section_ranges[0];
    assert_eq!(range.range, "Gen.31:55-Gen.32:1");
    assert_eq!(range.traditions, vec!["Latin".to_string(), "Greek".to_string()]);
}

#[test]
fn row_ids_are_stable_across_reads() {
    let options = IngestOptions::new("data/sample.txt");
    let a = read_str(SAMPLE, &options).unwrap();
    let b = read_str(SAMPLE, &options).unwrap();
    assert_eq!(a.rows[0].row_id, b.rows[0].row_id);
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_eq!(a.fingerprint.len(), 64);

    let other = read_str(SAMPLE, &IngestOptions::new("elsewhere.txt")).unwrap();
    assert_ne!(a.rows[0].row_id, other.rows[0].row_id);
    // Fingerprint covers the text, not the provenance.
    assert_eq!(a.fingerprint, other.fingerprint);
}

#[test]
fn short_header_synonyms_resolve() {
    let text = "\
#DataStart(Expanded)
SourceType\tSourceRef\tStandardRef\tAction\tNoteMarker\tNote A\tNote B\tAncient Versions\tTests
Greek\tGen.1:1\tGen.1:1\tKeep verse\t\tAlpha\tBeta\t\t
#DataEnd(Expanded)
";
    let doc = read_str(text, &IngestOptions::new("t")).unwrap();
    assert_eq!(doc.rows.len(), 1);
    assert_eq!(doc.rows[0].note_a.as_deref(), Some("Alpha"));
    assert_eq!(doc.rows[0].note_b.as_deref(), Some("Beta"));
}

#[test]
fn blank_cells_become_none_not_empty_strings() {
    let text = "\
#DataStart(Expanded)
SourceType\tSourceRef\tStandardRef\tAction\tNoteMarker\tNote A\tNote B\tAncient Versions\tTests
Latin\t\tGen.1:1\t\t \t\t\t\t
#DataEnd(Expanded)
";
    let doc = read_str(text, &IngestOptions::new("t")).unwrap();
    let row = &doc.rows[0];
    assert_eq!(row.source_ref, None);
    assert_eq!(row.action, None);
    assert_eq!(row.note_marker, None);
    assert!(!row.is_processable());
}

#[test]
fn missing_start_marker_is_an_error() {
    let err = read_str("just prose, no markers", &IngestOptions::new("bad.txt")).unwrap_err();
    assert!(matches!(err, IngestError::MissingDataSection { .. }));
}

#[test]
fn missing_end_marker_reads_to_end_of_input() {
    let text = "\
#DataStart(Expanded)
SourceType\tSourceRef\tStandardRef\tAction\tNoteMarker\tNote A\tNote B\tAncient Versions\tTests
Greek\tGen.1:1\tGen.1:1\tKeep verse\t\t\t\t\t
Greek\tGen.1:2\tGen.1:2\tKeep verse\t\t\t\t\t
";
    let doc = read_str(text, &IngestOptions::new("t")).unwrap();
    assert_eq!(doc.rows.len(), 2);
}

#[test]
fn read_file_reports_the_missing_path() {
    let err = read_file(
        Path::new("/nonexistent/tvtms-input.txt"),
        &IngestOptions::new("x"),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}

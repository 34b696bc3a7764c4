//! End-to-end grammar scenarios over the public parse entry point.

use tvtms_model::{Chapter, DiagnosticKind};
use tvtms_parse::{ParseContext, parse};

#[test]
fn simple_reference() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Gen.1:1", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    let reference = &outcome.refs[0];
    assert_eq!(reference.book.as_ref().map(|b| b.as_str()), Some("GEN"));
    assert_eq!(reference.chapter, Some(Chapter::Number(1)));
    assert_eq!(reference.verse, Some(1));
    assert_eq!(reference.subverse, None);
    assert_eq!(reference.marker, None);
    assert_eq!(reference.annotation, None);
    assert_eq!(reference.range_note, None);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn marker_and_annotation() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Rev.13:18(A)[=Rev.13:17]", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    let reference = &outcome.refs[0];
    assert_eq!(reference.book.as_ref().map(|b| b.as_str()), Some("REV"));
    assert_eq!(reference.chapter, Some(Chapter::Number(13)));
    assert_eq!(reference.verse, Some(18));
    assert_eq!(reference.marker.as_deref(), Some("A"));
    assert_eq!(reference.annotation.as_deref(), Some("[=Rev.13:17]"));
}

#[test]
fn range_expands_with_provenance() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Psa.68:1-3", &mut ctx);
    assert_eq!(outcome.refs.len(), 3);
    for (idx, reference) in outcome.refs.iter().enumerate() {
        assert_eq!(reference.book.as_ref().map(|b| b.as_str()), Some("PSA"));
        assert_eq!(reference.verse, Some(idx as u32 + 1));
        let note = reference.range_note.as_deref().expect("range note");
        assert!(note.contains("Psa.68:1-3"), "note was {note:?}");
    }
}

#[test]
fn title_pseudo_verse() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Psa.142:Title", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].verse, Some(0));
}

#[test]
fn marker_only_token() {
    let mut ctx = ParseContext::new();
    let outcome = parse("!a", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert!(outcome.refs[0].is_marker_only());
    assert_eq!(outcome.refs[0].marker.as_deref(), Some("!a"));
}

#[test]
fn context_book_carries_across_tokens() {
    let mut ctx = ParseContext::new();
    let first = parse("Jhn.3:16", &mut ctx);
    assert_eq!(first.refs.len(), 1);

    let second = parse("4:2", &mut ctx);
    assert_eq!(second.refs.len(), 1);
    assert_eq!(second.refs[0].book.as_ref().map(|b| b.as_str()), Some("JHN"));
    assert_eq!(second.refs[0].chapter, Some(Chapter::Number(4)));
    assert_eq!(second.refs[0].verse, Some(2));

    let third = parse("5", &mut ctx);
    assert_eq!(third.refs.len(), 1);
    assert_eq!(third.refs[0].book.as_ref().map(|b| b.as_str()), Some("JHN"));
    assert_eq!(third.refs[0].chapter, Some(Chapter::Number(5)));
    assert_eq!(third.refs[0].verse, Some(1));
}

#[test]
fn context_verse_without_context_has_no_book() {
    let mut ctx = ParseContext::new();
    let outcome = parse("3:16", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].book, None);
}

#[test]
fn compound_keeps_first_and_diagnoses_rest() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Gen.1:1; Gen.1:2, Gen.1:3", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].verse, Some(1));
    let dropped: Vec<_> = outcome
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::DroppedAlternate)
        .collect();
    assert_eq!(dropped.len(), 2);
}

#[test]
fn unknown_book_keeps_location_shape() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Xyzzy.1:1", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].book, None);
    assert!(
        outcome
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnknownBook)
    );
    // unresolved books must not poison the context
    let follow = parse("2:1", &mut ctx);
    assert_eq!(follow.refs[0].book, None);
}

#[test]
fn junk_produces_one_diagnostic_and_no_refs() {
    let mut ctx = ParseContext::new();
    let outcome = parse("not a reference at all", &mut ctx);
    assert!(outcome.refs.is_empty());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].kind,
        DiagnosticKind::UnparseableReference
    );
    assert_eq!(outcome.diagnostics[0].input, "not a reference at all");
}

#[test]
fn skip_tokens_are_silent() {
    let mut ctx = ParseContext::new();
    for token in ["English", "NA", "Latin", "Greek"] {
        let outcome = parse(token, &mut ctx);
        assert!(outcome.refs.is_empty(), "{token} produced refs");
        assert!(outcome.diagnostics.is_empty(), "{token} produced diagnostics");
    }
}

#[test]
fn stray_bang_is_repaired_with_diagnostic() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Gen.1:25!a", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].verse, Some(25));
    assert_eq!(outcome.refs[0].marker.as_deref(), Some("!a"));
    assert!(
        outcome
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::MalformedVerse)
    );
}

#[test]
fn subverse_forms() {
    let mut ctx = ParseContext::new();
    let letter = parse("Gen.1:6a", &mut ctx);
    assert_eq!(letter.refs[0].subverse.as_deref(), Some("a"));

    let dotted = parse("Gen.1:6.1", &mut ctx);
    assert_eq!(dotted.refs[0].subverse.as_deref(), Some("1"));
}

#[test]
fn letter_chapter_parses() {
    let mut ctx = ParseContext::new();
    let outcome = parse("EsG.A:1", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].chapter, Some(Chapter::Letter('A')));
    assert_eq!(outcome.refs[0].book.as_ref().map(|b| b.as_str()), Some("ESG"));
}

#[test]
fn whole_chapter_shorthand() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Gen.4", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].chapter, Some(Chapter::Number(4)));
    assert_eq!(outcome.refs[0].verse, Some(1));
}

#[test]
fn inverted_range_is_rejected() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Psa.68:3-1", &mut ctx);
    assert!(outcome.refs.is_empty());
    assert_eq!(
        outcome.diagnostics[0].kind,
        DiagnosticKind::UnparseableReference
    );
}

#[test]
fn range_note_suffix_survives() {
    let mut ctx = ParseContext::new();
    let outcome = parse("Gen.31:55+Gen.32:1", &mut ctx);
    assert_eq!(outcome.refs.len(), 1);
    assert_eq!(outcome.refs[0].verse, Some(55));
    assert_eq!(outcome.refs[0].range_note.as_deref(), Some("Gen.32:1"));
}

#[test]
fn empty_input_yields_nothing() {
    let mut ctx = ParseContext::new();
    let outcome = parse("   ", &mut ctx);
    assert!(outcome.is_empty());
}

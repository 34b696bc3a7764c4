//! The parser has to swallow anything the dataset throws at it without
//! panicking, and well-formed references must come back whole.

use proptest::prelude::*;

use tvtms_parse::{ParseContext, parse};

proptest! {
    #[test]
    fn parse_never_panics(input in ".*") {
        let mut ctx = ParseContext::new();
        let _ = parse(&input, &mut ctx);
    }

    #[test]
    fn well_formed_references_yield_one_ref(
        chapter in 1u32..=150,
        verse in 1u32..=176,
    ) {
        let mut ctx = ParseContext::new();
        let outcome = parse(&format!("Psa.{}:{}", chapter, verse), &mut ctx);
        prop_assert_eq!(outcome.refs.len(), 1);
        let reference = &outcome.refs[0];
        prop_assert_eq!(reference.book.as_ref().map(|b| b.as_str()), Some("PSA"));
        prop_assert_eq!(reference.verse, Some(verse));
        prop_assert!(reference.annotation.is_none());
        prop_assert!(reference.marker.is_none());
        prop_assert!(reference.range_note.is_none());
    }

    #[test]
    fn ranges_expand_to_exact_width(
        start in 1u32..=50,
        width in 0u32..=30,
    ) {
        let mut ctx = ParseContext::new();
        let end = start + width;
        let raw = format!("Psa.119:{}-{}", start, end);
        let outcome = parse(&raw, &mut ctx);
        prop_assert_eq!(outcome.refs.len(), (width + 1) as usize);
        for reference in &outcome.refs {
            let note = reference.range_note.as_deref().unwrap_or("");
            prop_assert!(note.contains(&raw));
        }
    }
}

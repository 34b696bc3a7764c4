//! The reference grammar.
//!
//! Ten ordered rules, first match wins:
//!
//! 1. strip a trailing `[=...]` annotation
//! 2. bare manuscript marker (`!a`)
//! 3. strip a trailing `+...` range-provenance suffix
//! 4. compound (`;`/`,`): keep the first alternative, diagnose the rest
//! 5. `Book.Chapter:Start-End` range, expanded verse by verse
//! 6. `Book.Chapter:Verse`
//! 7. `Book.Chapter` (whole-chapter shorthand, verse 1)
//! 8. `Chapter:Verse` against the context book
//! 9. bare numeric `Chapter` against the context book, verse 1
//! 10. no match: empty result plus a diagnostic
//!
//! `classify` covers the shape rules (2, 5-9) as a pure function so the
//! rule order stays auditable; `parse` wires in the strips, book
//! resolution, and context updates.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use tvtms_model::{BookId, Chapter, Diagnostic, DiagnosticKind, Reference};
use tvtms_standards::{BookCatalog, BookLookup};

use crate::context::ParseContext;
use crate::outcome::ParseOutcome;
use crate::verse_token::clean_verse_token;

static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<head>.*?)\s*(?P<ann>\[=[^\]]*\])\s*$").expect("Invalid annotation regex")
});

static MARKER_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^![A-Za-z0-9]+$").expect("Invalid marker regex"));

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<book>[^.:;,]+)\.(?P<chapter>\d+|[A-Za-z])\s*:\s*(?P<start>\d+)\s*-\s*(?P<end>\d+)$")
        .expect("Invalid range regex")
});

static FULL_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<book>[^.:;,]+)\.(?P<chapter>\d+|[A-Za-z])\s*:\s*(?P<verse>[^:]+)$")
        .expect("Invalid reference regex")
});

static BOOK_CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<book>[^.:;,]+)\.(?P<chapter>\d+|[A-Za-z])$")
        .expect("Invalid book-chapter regex")
});

static CONTEXT_VERSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<chapter>\d+|[A-Za-z])\s*:\s*(?P<verse>[^:]+)$")
        .expect("Invalid context-verse regex")
});

static CONTEXT_CHAPTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("Invalid context-chapter regex"));

/// Shape of a token after the strips, before book resolution.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenShape<'a> {
    MarkerOnly {
        marker: &'a str,
    },
    Range {
        book: &'a str,
        chapter: &'a str,
        start: &'a str,
        end: &'a str,
    },
    FullRef {
        book: &'a str,
        chapter: &'a str,
        verse: &'a str,
    },
    BookChapter {
        book: &'a str,
        chapter: &'a str,
    },
    ContextVerse {
        chapter: &'a str,
        verse: &'a str,
    },
    ContextChapter {
        chapter: &'a str,
    },
    Unparsed,
}

/// Apply the shape rules in order. Pure; no catalog, no context.
pub fn classify(token: &str) -> TokenShape<'_> {
    if MARKER_ONLY_RE.is_match(token) {
        return TokenShape::MarkerOnly { marker: token };
    }
    if let Some(caps) = RANGE_RE.captures(token) {
        return TokenShape::Range {
            book: group(token, &caps, "book"),
            chapter: group(token, &caps, "chapter"),
            start: group(token, &caps, "start"),
            end: group(token, &caps, "end"),
        };
    }
    if let Some(caps) = FULL_REF_RE.captures(token) {
        return TokenShape::FullRef {
            book: group(token, &caps, "book"),
            chapter: group(token, &caps, "chapter"),
            verse: group(token, &caps, "verse"),
        };
    }
    if let Some(caps) = BOOK_CHAPTER_RE.captures(token) {
        return TokenShape::BookChapter {
            book: group(token, &caps, "book"),
            chapter: group(token, &caps, "chapter"),
        };
    }
    if let Some(caps) = CONTEXT_VERSE_RE.captures(token) {
        return TokenShape::ContextVerse {
            chapter: group(token, &caps, "chapter"),
            verse: group(token, &caps, "verse"),
        };
    }
    if CONTEXT_CHAPTER_RE.is_match(token) {
        return TokenShape::ContextChapter { chapter: token };
    }
    TokenShape::Unparsed
}

fn group<'a>(token: &'a str, caps: &regex::Captures<'_>, name: &str) -> &'a str {
    caps.name(name)
        .map(|m| &token[m.range()])
        .unwrap_or("")
        .trim()
}

/// Parse one raw reference token.
///
/// Never fails: anything unmatchable comes back as an empty ref list plus
/// diagnostics. The context is updated by every successfully resolved
/// explicit book.
pub fn parse(raw: &str, ctx: &mut ParseContext) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let token = raw.trim();
    if token.is_empty() {
        return outcome;
    }

    // rule 1: trailing annotation
    let (token, annotation) = strip_annotation(token);

    // rule 2: bare manuscript marker
    if MARKER_ONLY_RE.is_match(token) {
        let mut reference = Reference::marker_only(token);
        reference.annotation = annotation;
        outcome.refs.push(reference);
        return outcome;
    }

    // rule 3: trailing range-provenance suffix
    let (token, range_note) = strip_range_note(token);

    // rule 4: compound alternatives
    let token = match token.split_once([';', ',']) {
        Some((first, rest)) => {
            for dropped in rest.split([';', ',']) {
                let dropped = dropped.trim();
                if !dropped.is_empty() {
                    outcome.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::DroppedAlternate,
                        raw.trim(),
                        format!("kept {:?}, dropped alternative {:?}", first.trim(), dropped),
                    ));
                }
            }
            first.trim()
        }
        None => token,
    };

    match classify(token) {
        TokenShape::MarkerOnly { marker } => {
            // reachable when rule 3/4 strips exposed a bare marker
            let mut reference = Reference::marker_only(marker);
            reference.annotation = annotation;
            reference.range_note = range_note;
            outcome.refs.push(reference);
        }
        TokenShape::Range {
            book,
            chapter,
            start,
            end,
        } => {
            let book_id = resolve_book(book, raw, ctx, &mut outcome);
            let Ok(chapter) = chapter.parse::<Chapter>() else {
                outcome.push_unparseable(raw, "unreadable chapter designator");
                return outcome;
            };
            let (Ok(start), Ok(end)) = (start.parse::<u32>(), end.parse::<u32>()) else {
                outcome.push_unparseable(raw, "range endpoint out of range");
                return outcome;
            };
            if start > end {
                outcome.push_unparseable(raw, "inverted verse range");
                return outcome;
            }
            let note = match &range_note {
                Some(prior) => format!("Part of range {}; {}", token, prior),
                None => format!("Part of range {}", token),
            };
            for verse in start..=end {
                let mut reference = Reference::location(book_id.clone(), chapter, verse);
                reference.annotation = annotation.clone();
                reference.range_note = Some(note.clone());
                outcome.refs.push(reference);
            }
        }
        TokenShape::FullRef {
            book,
            chapter,
            verse,
        } => {
            let book_id = resolve_book(book, raw, ctx, &mut outcome);
            push_verse_ref(
                &mut outcome,
                raw,
                book_id,
                chapter,
                verse,
                annotation,
                range_note,
            );
        }
        TokenShape::BookChapter { book, chapter } => {
            let book_id = resolve_book(book, raw, ctx, &mut outcome);
            push_chapter_ref(&mut outcome, raw, book_id, chapter, annotation, range_note);
        }
        TokenShape::ContextVerse { chapter, verse } => {
            let book_id = ctx.current_book().cloned();
            push_verse_ref(
                &mut outcome,
                raw,
                book_id,
                chapter,
                verse,
                annotation,
                range_note,
            );
        }
        TokenShape::ContextChapter { chapter } => {
            let book_id = ctx.current_book().cloned();
            push_chapter_ref(&mut outcome, raw, book_id, chapter, annotation, range_note);
        }
        TokenShape::Unparsed => {
            // rule 10, minus the known non-book tokens
            if !BookCatalog::global().is_skip_token(token) {
                outcome.push_unparseable(raw, "no grammar rule matched");
            }
        }
    }
    outcome
}

fn push_verse_ref(
    outcome: &mut ParseOutcome,
    raw: &str,
    book_id: Option<BookId>,
    chapter: &str,
    verse: &str,
    annotation: Option<String>,
    range_note: Option<String>,
) {
    let Ok(chapter) = chapter.parse::<Chapter>() else {
        outcome.push_unparseable(raw, "unreadable chapter designator");
        return;
    };
    match clean_verse_token(verse) {
        Ok(clean) => {
            if let Some(repair) = &clean.repair {
                outcome.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::MalformedVerse,
                    raw.trim(),
                    repair.clone(),
                ));
            }
            let mut reference = Reference::location(book_id, chapter, clean.verse);
            reference.subverse = clean.subverse;
            reference.marker = clean.marker;
            reference.annotation = annotation;
            reference.range_note = range_note;
            outcome.refs.push(reference);
        }
        Err(reason) => outcome.push_unparseable(raw, reason),
    }
}

fn push_chapter_ref(
    outcome: &mut ParseOutcome,
    raw: &str,
    book_id: Option<BookId>,
    chapter: &str,
    annotation: Option<String>,
    range_note: Option<String>,
) {
    let Ok(chapter) = chapter.parse::<Chapter>() else {
        outcome.push_unparseable(raw, "unreadable chapter designator");
        return;
    };
    // whole-chapter shorthand stands for its first verse
    let mut reference = Reference::location(book_id, chapter, 1);
    reference.annotation = annotation;
    reference.range_note = range_note;
    outcome.refs.push(reference);
}

fn resolve_book(
    raw_book: &str,
    raw: &str,
    ctx: &mut ParseContext,
    outcome: &mut ParseOutcome,
) -> Option<BookId> {
    match BookCatalog::global().resolve(raw_book) {
        BookLookup::Resolved(id) => {
            ctx.observe_book(&id);
            Some(id)
        }
        BookLookup::Skip => None,
        BookLookup::Unknown => {
            outcome.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnknownBook,
                raw.trim(),
                format!("unknown book {:?}", raw_book),
            ));
            None
        }
    }
}

fn strip_annotation(token: &str) -> (&str, Option<String>) {
    match ANNOTATION_RE.captures(token) {
        Some(caps) => {
            let head = group(token, &caps, "head");
            let ann = group(token, &caps, "ann");
            (head, Some(ann.to_string()))
        }
        None => (token, None),
    }
}

fn strip_range_note(token: &str) -> (&str, Option<String>) {
    match token.split_once('+') {
        Some((head, note)) if !head.trim().is_empty() && !note.trim().is_empty() => {
            (head.trim(), Some(note.trim().to_string()))
        }
        _ => (token, None),
    }
}

impl ParseOutcome {
    fn push_unparseable(&mut self, raw: &str, reason: impl Into<String>) {
        let reason = reason.into();
        debug!(token = raw.trim(), %reason, "unparseable reference");
        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnparseableReference,
            raw.trim(),
            reason,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_rules_apply_in_order() {
        assert_eq!(classify("!a"), TokenShape::MarkerOnly { marker: "!a" });
        assert_eq!(
            classify("Psa.68:1-3"),
            TokenShape::Range {
                book: "Psa",
                chapter: "68",
                start: "1",
                end: "3"
            }
        );
        assert_eq!(
            classify("Gen.1:1"),
            TokenShape::FullRef {
                book: "Gen",
                chapter: "1",
                verse: "1"
            }
        );
        assert_eq!(
            classify("Gen.4"),
            TokenShape::BookChapter {
                book: "Gen",
                chapter: "4"
            }
        );
        assert_eq!(
            classify("3:16"),
            TokenShape::ContextVerse {
                chapter: "3",
                verse: "16"
            }
        );
        assert_eq!(classify("12"), TokenShape::ContextChapter { chapter: "12" });
        assert_eq!(classify("???"), TokenShape::Unparsed);
    }

    #[test]
    fn range_needs_numeric_endpoints() {
        assert!(matches!(classify("Gen.1:5a-7"), TokenShape::FullRef { .. }));
        assert!(matches!(classify("EsG.A:1"), TokenShape::FullRef { .. }));
    }

    #[test]
    fn annotation_strip_keeps_literal_text() {
        let (head, ann) = strip_annotation("Rev.13:18(A)[=Rev.13:17]");
        assert_eq!(head, "Rev.13:18(A)");
        assert_eq!(ann.as_deref(), Some("[=Rev.13:17]"));

        let (head, ann) = strip_annotation("Gen.1:1");
        assert_eq!(head, "Gen.1:1");
        assert_eq!(ann, None);
    }

    #[test]
    fn range_note_strip() {
        let (head, note) = strip_range_note("Gen.31:55+Gen.32:1");
        assert_eq!(head, "Gen.31:55");
        assert_eq!(note.as_deref(), Some("Gen.32:1"));
    }
}

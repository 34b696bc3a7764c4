//! Range expansion for section lines.
//!
//! A section line names a span of verses, not a single location. The span
//! is enumerated into explicit verse references using the verse-count
//! table for chapter boundaries and the catalog's canonical book order for
//! cross-book walks.

use tracing::warn;
use tvtms_model::{BookId, Chapter, Diagnostic, DiagnosticKind, Reference};
use tvtms_parse::{ParseContext, TokenShape, classify, parse};
use tvtms_standards::{BookCatalog, VerseCounts};

/// Result of one expansion: identical (source, target) pairs, since a
/// section range applies the same locations to every listed tradition.
#[derive(Debug, Default)]
pub struct Expansion {
    pub pairs: Vec<(Reference, Reference)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    fn push_verse(&mut self, book: &BookId, chapter: Chapter, verse: u32) {
        let reference = Reference::location(Some(book.clone()), chapter, verse);
        self.pairs.push((reference.clone(), reference));
    }

    fn push_chapter(&mut self, book: &BookId, chapter: u32, counts: &VerseCounts) {
        for verse in 1..=counts.count_or_fallback(book, chapter) {
            self.push_verse(book, Chapter::Number(chapter), verse);
        }
    }
}

/// Enumerate every verse from `start` through `end` inclusive.
///
/// A pair that sorts backwards in canonical order is swapped and flagged
/// rather than rejected. Lettered chapters only enumerate within a single
/// chapter; a cross-chapter range with a letter endpoint yields nothing
/// but a diagnostic.
pub fn expand(start: &Reference, end: &Reference, counts: &VerseCounts) -> Expansion {
    let mut expansion = Expansion::default();
    let catalog = BookCatalog::global();
    let rendered = format!("{}-{}", start, end);

    let (Some(start_book), Some(end_book)) = (&start.book, &end.book) else {
        expansion.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnparseableReference,
            rendered,
            "range endpoints must both carry a book",
        ));
        return expansion;
    };
    let (Some(start_chapter), Some(end_chapter)) = (start.chapter, end.chapter) else {
        expansion.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnparseableReference,
            rendered,
            "range endpoints must both carry a chapter",
        ));
        return expansion;
    };
    let (Some(start_verse), Some(end_verse)) = (start.verse, end.verse) else {
        expansion.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnparseableReference,
            rendered,
            "range endpoints must both carry a verse",
        ));
        return expansion;
    };

    if start_chapter.is_letter() || end_chapter.is_letter() {
        if start_book == end_book && start_chapter == end_chapter {
            let (lo, hi) = if start_verse <= end_verse {
                (start_verse, end_verse)
            } else {
                warn!(range = %rendered, "reversed verse range; swapping endpoints");
                expansion.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ReversedRange,
                    rendered.clone(),
                    "range endpoints were reversed; swapped",
                ));
                (end_verse, start_verse)
            };
            for verse in lo..=hi {
                expansion.push_verse(start_book, start_chapter, verse);
            }
        } else {
            expansion.diagnostics.push(Diagnostic::new(
                DiagnosticKind::LetterChapterRange,
                rendered,
                "lettered chapters cannot span a multi-chapter range",
            ));
        }
        return expansion;
    }

    let (Some(start_order), Some(end_order)) =
        (catalog.order_index(start_book), catalog.order_index(end_book))
    else {
        expansion.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnknownBook,
            rendered,
            "range endpoint book is not in the catalog",
        ));
        return expansion;
    };
    // Letter chapters were handled above.
    let start_ch = start_chapter.as_number().unwrap_or(1);
    let end_ch = end_chapter.as_number().unwrap_or(1);

    let mut from = (start_order, start_book, start_ch, start_verse);
    let mut to = (end_order, end_book, end_ch, end_verse);
    if (from.0, from.2, from.3) > (to.0, to.2, to.3) {
        warn!(range = %rendered, "reversed range; swapping endpoints");
        expansion.diagnostics.push(Diagnostic::new(
            DiagnosticKind::ReversedRange,
            rendered,
            "range endpoints were reversed; swapped",
        ));
        std::mem::swap(&mut from, &mut to);
    }
    let (from_order, from_book, from_ch, from_verse) = from;
    let (to_order, to_book, to_ch, to_verse) = to;

    if from_order == to_order {
        if from_ch == to_ch {
            for verse in from_verse..=to_verse {
                expansion.push_verse(from_book, Chapter::Number(from_ch), verse);
            }
        } else {
            for verse in from_verse..=counts.count_or_fallback(from_book, from_ch) {
                expansion.push_verse(from_book, Chapter::Number(from_ch), verse);
            }
            for chapter in from_ch + 1..to_ch {
                expansion.push_chapter(from_book, chapter, counts);
            }
            for verse in 1..=to_verse {
                expansion.push_verse(from_book, Chapter::Number(to_ch), verse);
            }
        }
        return expansion;
    }

    // Cross-book: finish the start book, walk every intervening book in
    // canonical order, then enter the end book.
    for verse in from_verse..=counts.count_or_fallback(from_book, from_ch) {
        expansion.push_verse(from_book, Chapter::Number(from_ch), verse);
    }
    let start_total = catalog.chapters(from_book).unwrap_or(from_ch);
    for chapter in from_ch + 1..=start_total {
        expansion.push_chapter(from_book, chapter, counts);
    }
    for order in from_order + 1..to_order {
        if let Some(info) = catalog.by_order(order) {
            for chapter in 1..=info.chapters {
                expansion.push_chapter(&info.id, chapter, counts);
            }
        }
    }
    for chapter in 1..to_ch {
        expansion.push_chapter(to_book, chapter, counts);
    }
    for verse in 1..=to_verse {
        expansion.push_verse(to_book, Chapter::Number(to_ch), verse);
    }
    expansion
}

/// Split a section-line range expression into its two endpoints.
///
/// The dash's right side may be a full reference, a `chapter:verse` pair
/// (book carried over from the left side), or a bare number. A bare number
/// is a verse endpoint when the left side named a verse, and a chapter
/// endpoint (through that chapter's last verse) when it did not. `--` is
/// accepted as an explicit two-reference separator.
pub fn parse_range_expression(
    raw: &str,
    counts: &VerseCounts,
) -> (Option<(Reference, Reference)>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let trimmed = raw.trim();

    let (left_raw, right_raw) = match trimmed.split_once("--") {
        Some((left, right)) => (left.trim(), Some(right.trim())),
        None => match trimmed.split_once('-') {
            Some((left, right)) => (left.trim(), Some(right.trim())),
            None => (trimmed, None),
        },
    };

    let mut ctx = ParseContext::new();
    let left_outcome = parse(left_raw, &mut ctx);
    diagnostics.extend(left_outcome.diagnostics);
    let Some(start) = left_outcome.refs.into_iter().next() else {
        return (None, diagnostics);
    };

    let Some(right_raw) = right_raw else {
        // No dash: a single-location section.
        return (Some((start.clone(), start)), diagnostics);
    };

    let end = match classify(right_raw) {
        TokenShape::ContextChapter { chapter: digits } => match digits.parse::<u32>() {
            Ok(number) if left_raw.contains(':') => Some(Reference {
                book: start.book.clone(),
                chapter: start.chapter,
                verse: Some(number),
                ..Reference::default()
            }),
            Ok(number) => {
                let verse = start
                    .book
                    .as_ref()
                    .map(|book| counts.count_or_fallback(book, number))
                    .unwrap_or(1);
                Some(Reference::location(
                    start.book.clone(),
                    Chapter::Number(number),
                    verse,
                ))
            }
            Err(_) => None,
        },
        TokenShape::BookChapter { .. } => {
            let outcome = parse(right_raw, &mut right_context(&start));
            diagnostics.extend(outcome.diagnostics);
            outcome.refs.into_iter().next().map(|mut end| {
                // A chapter-only end runs through that chapter's last verse.
                if let (Some(book), Some(Chapter::Number(number))) = (&end.book, end.chapter) {
                    end.verse = Some(counts.count_or_fallback(book, number));
                }
                end
            })
        }
        TokenShape::FullRef { .. } | TokenShape::ContextVerse { .. } => {
            let outcome = parse(right_raw, &mut right_context(&start));
            diagnostics.extend(outcome.diagnostics);
            outcome.refs.into_iter().next()
        }
        _ => None,
    };

    match end {
        Some(end) => (Some((start, end)), diagnostics),
        None => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnparseableReference,
                raw.trim(),
                format!("range end {:?} did not parse", right_raw),
            ));
            (None, diagnostics)
        }
    }
}

fn right_context(start: &Reference) -> ParseContext {
    match &start.book {
        Some(book) => ParseContext::with_book(book.clone()),
        None => ParseContext::new(),
    }
}

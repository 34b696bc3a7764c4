//! Record validation.
//!
//! Enum membership of `mapping_type`/`category` is guaranteed by
//! construction (the normalizers are total), so the checks here are about
//! reference completeness and the two reference edge policies: the A-F
//! letter-chapter band and the Psalms-only verse 0.

use tvtms_model::{Documentation, Mapping, Rule};

use crate::issue::{Issue, Severity};

pub fn validate_mapping(mapping: &Mapping) -> Vec<Issue> {
    let mut issues = Vec::new();

    match &mapping.target_book {
        None => issues.push(Issue::MissingTargetBook),
        Some(book) => match mapping.target_chapter {
            None => issues.push(Issue::MissingTargetChapter { book: book.clone() }),
            Some(chapter) => {
                if !chapter.is_valid_letter() {
                    issues.push(Issue::TargetChapterInvalid {
                        book: book.clone(),
                        chapter,
                    });
                }
                match mapping.target_verse {
                    None => issues.push(Issue::MissingTargetVerse {
                        book: book.clone(),
                        chapter,
                    }),
                    Some(0) if !book.is_psalms() => {
                        issues.push(Issue::TargetVerseZeroOutsidePsalms {
                            book: book.clone(),
                            chapter,
                        });
                    }
                    Some(_) => {}
                }
            }
        },
    }

    match &mapping.source_book {
        Some(book) => match mapping.source_chapter {
            None => issues.push(Issue::MissingSourceChapter { book: book.clone() }),
            Some(chapter) => {
                if !chapter.is_valid_letter() {
                    issues.push(Issue::SourceChapterInvalid {
                        book: book.clone(),
                        chapter,
                    });
                }
                match mapping.source_verse {
                    None => issues.push(Issue::MissingSourceVerse {
                        book: book.clone(),
                        chapter,
                    }),
                    Some(0) if !book.is_psalms() => {
                        issues.push(Issue::SourceVerseZeroOutsidePsalms {
                            book: book.clone(),
                            chapter,
                        });
                    }
                    Some(_) => {}
                }
            }
        },
        // A designed-absent source is all-None. Stray location fields mean
        // the source book failed to resolve upstream.
        None => {
            if mapping.source_chapter.is_some() || mapping.source_verse.is_some() {
                issues.push(Issue::IncompleteSource {
                    chapter: mapping.source_chapter,
                    verse: mapping.source_verse,
                });
            }
        }
    }

    issues
}

/// A mapping joins the accepted stream when no error-severity issue holds.
pub fn is_valid(mapping: &Mapping) -> bool {
    validate_mapping(mapping)
        .iter()
        .all(|issue| issue.severity() != Severity::Error)
}

pub fn validate_rule(rule: &Rule) -> Vec<Issue> {
    if rule.content.trim().is_empty() {
        vec![Issue::EmptyRuleContent]
    } else {
        Vec::new()
    }
}

pub fn validate_documentation(documentation: &Documentation) -> Vec<Issue> {
    if documentation.content.trim().is_empty() {
        vec![Issue::EmptyDocumentationContent]
    } else {
        Vec::new()
    }
}

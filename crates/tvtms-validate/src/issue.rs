//! Validation issue types.
//!
//! Each variant carries only its needed data; codes are stable `TV####`
//! identifiers safe to match on downstream.

use std::fmt;

use serde::{Deserialize, Serialize};
use tvtms_model::{BookId, Chapter};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Record is excluded from the accepted stream
    Error,
    /// Should review
    Warning,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Validation issue raised against a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // Target reference checks
    /// Mapping has no target book
    MissingTargetBook,
    /// Target book present but chapter absent
    MissingTargetChapter { book: BookId },
    /// Target book and chapter present but verse absent
    MissingTargetVerse { book: BookId, chapter: Chapter },
    /// Lettered target chapter outside the A-F band
    TargetChapterInvalid { book: BookId, chapter: Chapter },
    /// Verse 0 is the psalm-title pseudo-verse; no other book has one
    TargetVerseZeroOutsidePsalms { book: BookId, chapter: Chapter },

    // Source reference checks (skipped entirely for designed-absent sources)
    /// Source book present but chapter absent
    MissingSourceChapter { book: BookId },
    /// Source book and chapter present but verse absent
    MissingSourceVerse { book: BookId, chapter: Chapter },
    /// Lettered source chapter outside the A-F band
    SourceChapterInvalid { book: BookId, chapter: Chapter },
    /// Verse 0 on a non-Psalms source
    SourceVerseZeroOutsidePsalms { book: BookId, chapter: Chapter },
    /// Source chapter/verse present without a source book
    IncompleteSource {
        chapter: Option<Chapter>,
        verse: Option<u32>,
    },

    // Auxiliary records
    /// Rule record with blank content
    EmptyRuleContent,
    /// Documentation record with blank content
    EmptyDocumentationContent,
}

impl Issue {
    /// Stable issue code.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::MissingTargetBook => "TV0001",
            Issue::MissingTargetChapter { .. } => "TV0002",
            Issue::MissingTargetVerse { .. } => "TV0003",
            Issue::TargetChapterInvalid { .. } => "TV0004",
            Issue::TargetVerseZeroOutsidePsalms { .. } => "TV0005",
            Issue::MissingSourceChapter { .. } => "TV0011",
            Issue::MissingSourceVerse { .. } => "TV0012",
            Issue::SourceChapterInvalid { .. } => "TV0013",
            Issue::SourceVerseZeroOutsidePsalms { .. } => "TV0014",
            Issue::IncompleteSource { .. } => "TV0015",
            Issue::EmptyRuleContent => "TV0021",
            Issue::EmptyDocumentationContent => "TV0022",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::EmptyRuleContent | Issue::EmptyDocumentationContent => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingTargetBook => write!(f, "Mapping has no target book"),
            Issue::MissingTargetChapter { book } => {
                write!(f, "Target {} has no chapter", book)
            }
            Issue::MissingTargetVerse { book, chapter } => {
                write!(f, "Target {}.{} has no verse", book, chapter)
            }
            Issue::TargetChapterInvalid { book, chapter } => {
                write!(f, "Target chapter {}.{} is outside the A-F letter band", book, chapter)
            }
            Issue::TargetVerseZeroOutsidePsalms { book, chapter } => {
                write!(f, "Verse 0 is a Psalm-title pseudo-verse; {}.{} cannot carry one", book, chapter)
            }
            Issue::MissingSourceChapter { book } => {
                write!(f, "Source {} has no chapter", book)
            }
            Issue::MissingSourceVerse { book, chapter } => {
                write!(f, "Source {}.{} has no verse", book, chapter)
            }
            Issue::SourceChapterInvalid { book, chapter } => {
                write!(f, "Source chapter {}.{} is outside the A-F letter band", book, chapter)
            }
            Issue::SourceVerseZeroOutsidePsalms { book, chapter } => {
                write!(f, "Verse 0 is a Psalm-title pseudo-verse; {}.{} cannot carry one", book, chapter)
            }
            Issue::IncompleteSource { chapter, verse } => {
                write!(
                    f,
                    "Source location fields present without a source book (chapter: {:?}, verse: {:?})",
                    chapter, verse
                )
            }
            Issue::EmptyRuleContent => write!(f, "Rule record has blank content"),
            Issue::EmptyDocumentationContent => {
                write!(f, "Documentation record has blank content")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Issue::MissingTargetBook.code(), "TV0001");
        assert_eq!(Issue::EmptyRuleContent.code(), "TV0021");
    }

    #[test]
    fn severity_split() {
        assert_eq!(Issue::MissingTargetBook.severity(), Severity::Error);
        assert_eq!(Issue::EmptyRuleContent.severity(), Severity::Warning);
        assert_eq!(Severity::parse("warning"), Some(Severity::Warning));
        assert_eq!(Severity::parse("bogus"), None);
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BookId;

/// Chapter designator.
///
/// Almost all chapters are numeric. A handful of liturgical and appendix
/// sections (Greek Esther additions, psalm prologues) are lettered instead;
/// the dataset writes those as a single letter where a chapter number would
/// stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chapter {
    Number(u32),
    Letter(char),
}

impl Chapter {
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Chapter::Number(n) => Some(*n),
            Chapter::Letter(_) => None,
        }
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Chapter::Letter(_))
    }

    /// Lettered sections are only valid in the A-F band the dataset uses.
    pub fn is_valid_letter(&self) -> bool {
        match self {
            Chapter::Number(_) => true,
            Chapter::Letter(c) => ('A'..='F').contains(c),
        }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chapter::Number(n) => write!(f, "{}", n),
            Chapter::Letter(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for Chapter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u32>() {
            return Ok(Chapter::Number(n));
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Ok(Chapter::Letter(c.to_ascii_uppercase()))
            }
            _ => Err(format!("Unknown chapter designator: {}", s)),
        }
    }
}

/// One resolved verse location, or a manuscript-marker-only record.
///
/// If `book` is absent the location fields are meaningless; the only
/// meaningful book-less Reference is one carrying nothing but `marker`
/// (a manuscript-witness tag such as `!a`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub book: Option<BookId>,
    pub chapter: Option<Chapter>,
    /// Verse number; 0 is the psalm-title pseudo-verse.
    pub verse: Option<u32>,
    /// Sub-unit within a verse ("a", "1") used when one tradition splits
    /// a verse that another does not.
    pub subverse: Option<String>,
    /// Manuscript/variant tag ("A", "!a", "*"), not a location component.
    pub marker: Option<String>,
    /// Bracketed cross-reference retained verbatim, e.g. "[=Rev.13:17]".
    pub annotation: Option<String>,
    /// Provenance of a range expansion, e.g. "Part of range Psa.68:1-3".
    pub range_note: Option<String>,
}

impl Reference {
    pub fn location(book: Option<BookId>, chapter: Chapter, verse: u32) -> Self {
        Self {
            book,
            chapter: Some(chapter),
            verse: Some(verse),
            ..Self::default()
        }
    }

    pub fn marker_only(marker: impl Into<String>) -> Self {
        Self {
            marker: Some(marker.into()),
            ..Self::default()
        }
    }

    pub fn is_location(&self) -> bool {
        self.chapter.is_some() && self.verse.is_some()
    }

    pub fn is_marker_only(&self) -> bool {
        self.marker.is_some() && self.book.is_none() && self.chapter.is_none()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_marker_only() {
            return match &self.marker {
                Some(marker) => write!(f, "!{}", marker.trim_start_matches('!')),
                None => f.write_str("?"),
            };
        }
        match &self.book {
            Some(book) => write!(f, "{}", book)?,
            None => f.write_str("?")?,
        }
        if let Some(chapter) = &self.chapter {
            write!(f, ".{}", chapter)?;
        }
        if let Some(verse) = &self.verse {
            write!(f, ":{}", verse)?;
        }
        if let Some(subverse) = &self.subverse {
            write!(f, ".{}", subverse)?;
        }
        Ok(())
    }
}

#![deny(unsafe_code)]

//! Per-chapter verse counts used by range expansion.
//!
//! The embedded table covers the books the dataset's section ranges
//! actually traverse; anything else falls back to a configurable default
//! so expansion degrades gracefully instead of failing. A full external
//! table can be supplied as CSV (`book,chapter,verses`).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::debug;

use tvtms_model::BookId;

use crate::error::{Result, StandardsError};

const EMBEDDED_CSV: &str = include_str!("data/verse_counts.csv");

/// Used when a (book, chapter) pair is absent from the table; close to the
/// canon-wide average chapter length.
pub const DEFAULT_FALLBACK: u32 = 30;

#[derive(Debug, Deserialize)]
struct VerseCountRow {
    book: String,
    chapter: u32,
    verses: u32,
}

#[derive(Debug, Clone)]
pub struct VerseCounts {
    counts: BTreeMap<(String, u32), u32>,
    fallback: u32,
}

static EMBEDDED: LazyLock<VerseCounts> = LazyLock::new(|| {
    VerseCounts::parse_reader(EMBEDDED_CSV.as_bytes(), Path::new("<embedded>"))
        .expect("Invalid embedded verse count table")
});

impl VerseCounts {
    /// The embedded default table.
    pub fn embedded() -> &'static VerseCounts {
        &EMBEDDED
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| StandardsError::io(path, e))?;
        Self::parse_reader(file, path)
    }

    fn parse_reader(reader: impl std::io::Read, path: &Path) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut counts = BTreeMap::new();
        for (idx, record) in csv_reader.deserialize::<VerseCountRow>().enumerate() {
            let row = record.map_err(|e| StandardsError::csv(path, e.to_string()))?;
            if row.verses == 0 {
                return Err(StandardsError::InvalidVerseCount {
                    row: idx + 1,
                    message: format!("{}.{} has zero verses", row.book, row.chapter),
                });
            }
            counts.insert((row.book.to_ascii_uppercase(), row.chapter), row.verses);
        }

        Ok(Self {
            counts,
            fallback: DEFAULT_FALLBACK,
        })
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback.max(1);
        self
    }

    pub fn fallback(&self) -> u32 {
        self.fallback
    }

    pub fn get(&self, book: &BookId, chapter: u32) -> Option<u32> {
        self.counts
            .get(&(book.as_str().to_string(), chapter))
            .copied()
    }

    /// Count for the chapter, or the fallback when the table has no entry.
    pub fn count_or_fallback(&self, book: &BookId, chapter: u32) -> u32 {
        match self.get(book, chapter) {
            Some(count) => count,
            None => {
                debug!(book = %book, chapter, fallback = self.fallback, "verse count fallback");
                self.fallback
            }
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str) -> BookId {
        BookId::new(id).expect("book id")
    }

    #[test]
    fn embedded_table_has_known_counts() {
        let counts = VerseCounts::embedded();
        assert_eq!(counts.get(&book("GEN"), 1), Some(31));
        assert_eq!(counts.get(&book("PSA"), 119), Some(176));
        assert_eq!(counts.get(&book("PSA"), 117), Some(2));
        assert_eq!(counts.get(&book("REV"), 22), Some(21));
    }

    #[test]
    fn fallback_applies_to_unknown_chapters() {
        let counts = VerseCounts::embedded();
        assert_eq!(counts.get(&book("LEV"), 1), None);
        assert_eq!(counts.count_or_fallback(&book("LEV"), 1), DEFAULT_FALLBACK);

        let custom = counts.clone().with_fallback(12);
        assert_eq!(custom.count_or_fallback(&book("LEV"), 1), 12);
        // known chapters are unaffected
        assert_eq!(custom.count_or_fallback(&book("GEN"), 1), 31);
    }

    #[test]
    fn zero_fallback_is_clamped() {
        let counts = VerseCounts::embedded().clone().with_fallback(0);
        assert_eq!(counts.fallback(), 1);
    }

    #[test]
    fn csv_parse_rejects_zero_verses() {
        let bad = "book,chapter,verses\nGEN,1,0\n";
        let err = VerseCounts::parse_reader(bad.as_bytes(), Path::new("<test>"));
        assert!(err.is_err());
    }
}

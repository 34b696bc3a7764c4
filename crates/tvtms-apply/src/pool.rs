#![deny(unsafe_code)]

//! Verse text pools for the action replay.
//!
//! The source pool holds one row per tradition verse, loaded from a
//! tab-separated file (`tradition, book, chapter, verse, subverse, text`).
//! Rows are claimed at most once; the standardized pool collects the
//! replayed output in the same shape and writes it back out as TSV.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tvtms_model::{BookId, Chapter, Mapping, Tradition};

use crate::error::{ApplyError, Result};

/// Lookup key shared by both pools. The tradition component is stored in
/// `Tradition::lookup_key` form so pool matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PoolKey {
    pub tradition: String,
    pub book: BookId,
    pub chapter: Chapter,
    pub verse: u32,
    pub subverse: Option<String>,
}

impl PoolKey {
    pub fn new(
        tradition: &Tradition,
        book: BookId,
        chapter: Chapter,
        verse: u32,
        subverse: Option<String>,
    ) -> Self {
        Self {
            tradition: tradition.lookup_key(),
            book,
            chapter,
            verse,
            subverse,
        }
    }

    /// Key for the row this mapping consumes; `None` when the source
    /// location is incomplete.
    pub fn from_source(mapping: &Mapping) -> Option<Self> {
        Some(Self {
            tradition: mapping.source_tradition.lookup_key(),
            book: mapping.source_book.clone()?,
            chapter: mapping.source_chapter?,
            verse: mapping.source_verse?,
            subverse: mapping.source_subverse.clone(),
        })
    }

    /// Key for the standardized row this mapping writes.
    pub fn from_target(mapping: &Mapping) -> Option<Self> {
        Some(Self {
            tradition: mapping.target_tradition.lookup_key(),
            book: mapping.target_book.clone()?,
            chapter: mapping.target_chapter?,
            verse: mapping.target_verse?,
            subverse: mapping.target_subverse.clone(),
        })
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}:{}",
            self.tradition, self.book, self.chapter, self.verse
        )?;
        if let Some(subverse) = &self.subverse {
            write!(f, ".{}", subverse)?;
        }
        Ok(())
    }
}

/// Raw TSV row as read from or written to disk.
#[derive(Debug, Serialize, Deserialize)]
struct PoolRecord {
    tradition: String,
    book: String,
    chapter: String,
    verse: u32,
    subverse: Option<String>,
    text: String,
}

#[derive(Debug, Clone)]
struct PoolEntry {
    text: String,
    consumed: bool,
}

/// Result of a successful claim. `ambiguous` is set when more than one
/// unconsumed row matched the key; the first one was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claimed {
    pub text: String,
    pub ambiguous: bool,
}

/// Source verse texts with at-most-once consumption.
#[derive(Debug, Clone, Default)]
pub struct VersePool {
    entries: BTreeMap<PoolKey, Vec<PoolEntry>>,
    len: usize,
}

impl VersePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tsv_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|e| ApplyError::io("open", path, e))?;
        Self::parse_reader(file, path)
    }

    fn parse_reader(reader: impl std::io::Read, path: &Path) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut pool = Self::new();
        for (idx, record) in csv_reader.deserialize::<PoolRecord>().enumerate() {
            let row = record.map_err(|e| ApplyError::csv(path, e.to_string()))?;
            let invalid = |message: String| ApplyError::InvalidRow {
                path: path.to_path_buf(),
                row: idx + 1,
                message,
            };
            let tradition =
                Tradition::new(row.tradition).map_err(|e| invalid(e.to_string()))?;
            let book = BookId::new(row.book).map_err(|e| invalid(e.to_string()))?;
            let chapter = row.chapter.parse::<Chapter>().map_err(invalid)?;
            let key = PoolKey::new(&tradition, book, chapter, row.verse, row.subverse);
            pool.insert(key, row.text);
        }
        Ok(pool)
    }

    pub fn insert(&mut self, key: PoolKey, text: impl Into<String>) {
        self.entries.entry(key).or_default().push(PoolEntry {
            text: text.into(),
            consumed: false,
        });
        self.len += 1;
    }

    /// Check-and-set consumption: the first unconsumed row under the key is
    /// marked consumed and returned; no later claim can see it again.
    pub fn claim(&mut self, key: &PoolKey) -> Option<Claimed> {
        let slots = self.entries.get_mut(key)?;
        let mut unconsumed = slots.iter_mut().filter(|slot| !slot.consumed);
        let first = unconsumed.next()?;
        first.consumed = true;
        Some(Claimed {
            text: first.text.clone(),
            ambiguous: unconsumed.next().is_some(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rows not yet consumed by a claim.
    pub fn remaining(&self) -> usize {
        self.entries
            .values()
            .flatten()
            .filter(|slot| !slot.consumed)
            .count()
    }
}

/// One replayed output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizedRow {
    pub tradition: String,
    pub book: BookId,
    pub chapter: Chapter,
    pub verse: u32,
    pub subverse: Option<String>,
    pub text: String,
}

/// Output of the action replay, keyed like the source pool and written in
/// key order so repeated runs produce identical files.
#[derive(Debug, Clone, Default)]
pub struct StandardizedPool {
    rows: BTreeMap<PoolKey, StandardizedRow>,
}

impl StandardizedPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the row under `key`; with `append` the new text
    /// is joined onto the existing text instead (merge actions).
    pub fn upsert(&mut self, key: PoolKey, tradition: &str, text: &str, append: bool) {
        match self.rows.entry(key) {
            Entry::Occupied(mut slot) => {
                let row = slot.get_mut();
                if append {
                    if !row.text.is_empty() {
                        row.text.push(' ');
                    }
                    row.text.push_str(text);
                } else {
                    row.text = text.to_string();
                }
            }
            Entry::Vacant(slot) => {
                let row = StandardizedRow {
                    tradition: tradition.to_string(),
                    book: slot.key().book.clone(),
                    chapter: slot.key().chapter,
                    verse: slot.key().verse,
                    subverse: slot.key().subverse.clone(),
                    text: text.to_string(),
                };
                slot.insert(row);
            }
        }
    }

    pub fn get(&self, key: &PoolKey) -> Option<&StandardizedRow> {
        self.rows.get(key)
    }

    pub fn rows(&self) -> impl Iterator<Item = &StandardizedRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_tsv_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ApplyError::io("create directory for", path, e))?;
        }
        let file = fs::File::create(path).map_err(|e| ApplyError::io("create", path, e))?;
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(file);
        for row in self.rows.values() {
            let record = PoolRecord {
                tradition: row.tradition.clone(),
                book: row.book.as_str().to_string(),
                chapter: row.chapter.to_string(),
                verse: row.verse,
                subverse: row.subverse.clone(),
                text: row.text.clone(),
            };
            writer
                .serialize(record)
                .map_err(|e| ApplyError::csv(path, e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| ApplyError::io("write", path, e))?;
        Ok(())
    }
}

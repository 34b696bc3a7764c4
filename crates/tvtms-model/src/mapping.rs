use serde::{Deserialize, Serialize};

use crate::{ActionTier, BookId, Category, Chapter, MappingType, RowId, Tradition};

/// One directional correspondence: a tradition's reference mapped onto the
/// standard numbering.
///
/// Built once per parsed row (or once per expanded verse of a range) and
/// immutable afterwards; corrections are new records replacing old ones in
/// the store, never in-place edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub row_id: RowId,
    pub source_tradition: Tradition,
    pub target_tradition: Tradition,
    pub source_book: Option<BookId>,
    pub source_chapter: Option<Chapter>,
    pub source_verse: Option<u32>,
    pub source_subverse: Option<String>,
    pub target_book: Option<BookId>,
    pub target_chapter: Option<Chapter>,
    pub target_verse: Option<u32>,
    pub target_subverse: Option<String>,
    pub mapping_type: MappingType,
    pub category: Category,
    pub notes: Option<String>,
    pub source_range_note: Option<String>,
    pub target_range_note: Option<String>,
    pub note_marker: Option<String>,
    pub ancient_versions: Option<String>,
    /// Raw action phrase, retained for tier classification.
    pub action: String,
}

impl Mapping {
    pub fn action_tier(&self) -> ActionTier {
        ActionTier::classify(&self.action, self.mapping_type)
    }

    /// Absent-source mappings (omit/insert shapes) consume nothing during
    /// the action replay.
    pub fn has_source(&self) -> bool {
        self.source_book.is_some()
    }
}

/// Free-text test condition attached to a row (the Tests column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub row_id: RowId,
    pub tradition: Tradition,
    pub content: String,
}

/// Free-text footnote attached to a row (the note columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    pub row_id: RowId,
    pub tradition: Tradition,
    pub content: String,
}

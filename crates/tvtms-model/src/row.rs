use serde::{Deserialize, Serialize};

use crate::RowId;

/// One recognized data row, straight out of the data section. Blank cells
/// become `None` at extraction time, never empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub row_id: RowId,
    /// 1-based position within the data section.
    pub row_number: u32,
    pub source_type: Option<String>,
    pub source_ref: Option<String>,
    pub standard_ref: Option<String>,
    pub action: Option<String>,
    pub note_marker: Option<String>,
    pub note_a: Option<String>,
    pub note_b: Option<String>,
    pub ancient_versions: Option<String>,
    pub tests: Option<String>,
}

impl RawRow {
    /// A row is processable when the tradition, standard reference, and
    /// action are all present. The source reference may legitimately be
    /// absent (verses a tradition never had).
    pub fn is_processable(&self) -> bool {
        self.source_type.is_some() && self.standard_ref.is_some() && self.action.is_some()
    }
}

/// A `$`-prefixed section line: one range expression applying to a list of
/// traditions at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRangeLine {
    pub row_id: RowId,
    pub row_number: u32,
    /// The range expression with the leading `$` stripped.
    pub range: String,
    pub traditions: Vec<String>,
}

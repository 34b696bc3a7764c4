#![deny(unsafe_code)]

//! Data-section extraction.
//!
//! A TVTMS file is mostly prose; the machine-readable part sits between
//! the literal lines `#DataStart(Expanded)` and `#DataEnd(Expanded)`.
//! Inside, `'=` starts a comment, the first content line is a
//! tab-separated header, `$`-prefixed lines carry section ranges, and
//! everything else is a data row. Extraction is dumb on purpose: blank
//! cells become `None`, nothing is interpreted, and rows missing required
//! fields are kept for the pipeline to count and skip.

use std::path::Path;

use sha2::Digest;
use tracing::{debug, warn};

use tvtms_model::{RawRow, RowId, SectionRangeLine};
use tvtms_standards::sha256_hex;

use crate::error::{IngestError, Result};

const DATA_START: &str = "#DataStart(Expanded)";
const DATA_END: &str = "#DataEnd(Expanded)";
const COMMENT_PREFIX: &str = "'=";

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Stable source identifier for provenance/RowId derivation
    /// (e.g. repo-relative path).
    pub source_id: String,
}

impl IngestOptions {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
        }
    }
}

/// Everything the data section yielded.
#[derive(Debug, Clone)]
pub struct TvtmsDocument {
    pub source_id: String,
    /// sha256 of the raw input, lowercase hex.
    pub fingerprint: String,
    pub rows: Vec<RawRow>,
    pub section_ranges: Vec<SectionRangeLine>,
}

fn derive_row_id(source_id: &str, record_number: u32) -> RowId {
    // Deterministic: sha256("<source_id>\0<record_number>"), first 16 bytes.
    let mut hasher = sha2::Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(record_number.to_string().as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    RowId::from_first_16_bytes_of_sha256(digest)
}

pub fn read_file(path: &Path, options: &IngestOptions) -> Result<TvtmsDocument> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // the dataset is ASCII in practice; tolerate stray bytes over aborting
    let text = String::from_utf8_lossy(&bytes);
    read_str(&text, options)
}

pub fn read_str(text: &str, options: &IngestOptions) -> Result<TvtmsDocument> {
    let section = extract_section(text, &options.source_id)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(section.as_bytes());

    let mut columns: Option<ColumnMap> = None;
    let mut rows = Vec::new();
    let mut section_ranges = Vec::new();
    let mut row_number: u32 = 0;

    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Malformed {
            source_id: options.source_id.clone(),
            message: e.to_string(),
        })?;
        let fields: Vec<&str> = record.iter().map(str::trim).collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        let Some(map) = &columns else {
            // first content line is the header
            columns = Some(ColumnMap::from_header(&fields));
            continue;
        };

        row_number += 1;
        let row_id = derive_row_id(&options.source_id, row_number);

        if let Some(range) = fields[0].strip_prefix('$') {
            let traditions: Vec<String> = fields[1..]
                .iter()
                .filter(|f| !f.is_empty())
                .map(|f| (*f).to_string())
                .collect();
            section_ranges.push(SectionRangeLine {
                row_id,
                row_number,
                range: range.trim().to_string(),
                traditions,
            });
            continue;
        }

        rows.push(RawRow {
            row_id,
            row_number,
            source_type: map.cell(&fields, map.source_type),
            source_ref: map.cell(&fields, map.source_ref),
            standard_ref: map.cell(&fields, map.standard_ref),
            action: map.cell(&fields, map.action),
            note_marker: map.cell(&fields, map.note_marker),
            note_a: map.cell(&fields, map.note_a),
            note_b: map.cell(&fields, map.note_b),
            ancient_versions: map.cell(&fields, map.ancient_versions),
            tests: map.cell(&fields, map.tests),
        });
    }

    debug!(
        rows = rows.len(),
        section_ranges = section_ranges.len(),
        "data section extracted"
    );

    Ok(TvtmsDocument {
        source_id: options.source_id.clone(),
        fingerprint: sha256_hex(text.as_bytes()),
        rows,
        section_ranges,
    })
}

/// The section body with comments removed, ready for the TSV pass.
fn extract_section(text: &str, source_id: &str) -> Result<String> {
    let mut inside = false;
    let mut saw_end = false;
    let mut kept = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if !inside {
            if trimmed == DATA_START {
                inside = true;
            }
            continue;
        }
        if trimmed == DATA_END {
            saw_end = true;
            break;
        }
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        kept.push(line);
    }

    if !inside {
        return Err(IngestError::MissingDataSection {
            source_id: source_id.to_string(),
        });
    }
    if !saw_end {
        warn!(source = source_id, "missing #DataEnd(Expanded); read to end of input");
    }

    Ok(kept.join("\n"))
}

#[derive(Debug, Default)]
struct ColumnMap {
    source_type: Option<usize>,
    source_ref: Option<usize>,
    standard_ref: Option<usize>,
    action: Option<usize>,
    note_marker: Option<usize>,
    note_a: Option<usize>,
    note_b: Option<usize>,
    ancient_versions: Option<usize>,
    tests: Option<usize>,
}

impl ColumnMap {
    fn from_header(fields: &[&str]) -> Self {
        let mut map = Self::default();
        for (idx, field) in fields.iter().enumerate() {
            let name = field.to_ascii_lowercase();
            let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
            match name.as_str() {
                "sourcetype" | "source type" => map.source_type = Some(idx),
                "sourceref" | "source ref" => map.source_ref = Some(idx),
                "standardref" | "standard ref" => map.standard_ref = Some(idx),
                "action" => map.action = Some(idx),
                "notemarker" | "note marker" => map.note_marker = Some(idx),
                "reversification note" | "note a" => map.note_a = Some(idx),
                "versification note" | "note b" => map.note_b = Some(idx),
                "ancient versions" => map.ancient_versions = Some(idx),
                "tests" => map.tests = Some(idx),
                "" => {}
                other => debug!(column = other, "ignoring unrecognized column"),
            }
        }
        if map.source_type.is_none() || map.standard_ref.is_none() || map.action.is_none() {
            warn!("header lacks SourceType/StandardRef/Action; most rows will be skipped");
        }
        map
    }

    fn cell(&self, fields: &[&str], idx: Option<usize>) -> Option<String> {
        let value = fields.get(idx?)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_id_is_deterministic() {
        let a = derive_row_id("data/tvtms.txt", 1);
        let b = derive_row_id("data/tvtms.txt", 1);
        let c = derive_row_id("data/tvtms.txt", 2);
        let d = derive_row_id("other.txt", 1);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn missing_section_is_an_error() {
        let err = read_str("no markers here", &IngestOptions::new("x"));
        assert!(matches!(err, Err(IngestError::MissingDataSection { .. })));
    }
}

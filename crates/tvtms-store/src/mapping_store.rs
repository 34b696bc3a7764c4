//! Storage collaborators for accepted records.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;
use tvtms_model::{Documentation, Mapping, Rule};

use crate::error::{Result, StoreError};

pub const MAPPINGS_FILE: &str = "mappings.json";
pub const RULES_FILE: &str = "rules.json";
pub const DOCUMENTATION_FILE: &str = "documentation.json";

/// Sink for validated records.
///
/// Every call fully replaces prior content of its record kind, so storing
/// the same batch twice leaves the store unchanged. Partial writes must not
/// survive a failure; the failed batch is retried as a whole.
pub trait MappingStore {
    fn store_mappings(&mut self, mappings: &[Mapping]) -> Result<usize>;
    fn store_rules(&mut self, rules: &[Rule]) -> Result<usize>;
    fn store_documentation(&mut self, documentation: &[Documentation]) -> Result<usize>;
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub mappings: Vec<Mapping>,
    pub rules: Vec<Rule>,
    pub documentation: Vec<Documentation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingStore for MemoryStore {
    fn store_mappings(&mut self, mappings: &[Mapping]) -> Result<usize> {
        self.mappings.clear();
        self.mappings.extend_from_slice(mappings);
        Ok(self.mappings.len())
    }

    fn store_rules(&mut self, rules: &[Rule]) -> Result<usize> {
        self.rules.clear();
        self.rules.extend_from_slice(rules);
        Ok(self.rules.len())
    }

    fn store_documentation(&mut self, documentation: &[Documentation]) -> Result<usize> {
        self.documentation.clear();
        self.documentation.extend_from_slice(documentation);
        Ok(self.documentation.len())
    }
}

/// One JSON array file per record kind under a target directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_records<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<usize> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::io("create directory for", &self.dir, e))?;
        let path = self.dir.join(file_name);
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| StoreError::Serialize {
            path: path.clone(),
            source: e,
        })?;

        // Write to a temp file first, then rename for atomicity.
        let temp_path = path.with_extension("json.tmp");
        let mut file =
            File::create(&temp_path).map_err(|e| StoreError::io("create", &temp_path, e))?;
        file.write_all(&bytes)
            .map_err(|e| StoreError::io("write", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io("sync", &temp_path, e))?;
        fs::rename(&temp_path, &path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        info!(records = records.len(), path = %path.display(), "wrote record file");
        Ok(records.len())
    }
}

impl MappingStore for JsonDirStore {
    fn store_mappings(&mut self, mappings: &[Mapping]) -> Result<usize> {
        self.write_records(MAPPINGS_FILE, mappings)
    }

    fn store_rules(&mut self, rules: &[Rule]) -> Result<usize> {
        self.write_records(RULES_FILE, rules)
    }

    fn store_documentation(&mut self, documentation: &[Documentation]) -> Result<usize> {
        self.write_records(DOCUMENTATION_FILE, documentation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvtms_model::{BookId, Category, Chapter, MappingType, RowId, Tradition};

    fn sample_mapping() -> Mapping {
        Mapping {
            row_id: RowId::from_first_16_bytes_of_sha256([7u8; 32]),
            source_tradition: Tradition::new("Latin").unwrap(),
            target_tradition: Tradition::standard(),
            source_book: Some(BookId::new("Psa").unwrap()),
            source_chapter: Some(Chapter::Number(142)),
            source_verse: Some(1),
            source_subverse: None,
            target_book: Some(BookId::new("Psa").unwrap()),
            target_chapter: Some(Chapter::Number(142)),
            target_verse: Some(2),
            target_subverse: None,
            mapping_type: MappingType::Renumbering,
            category: Category::Opt,
            notes: None,
            source_range_note: None,
            target_range_note: None,
            note_marker: Some("Opt.".to_string()),
            ancient_versions: None,
            action: "Renumber verse".to_string(),
        }
    }

    #[test]
    fn memory_store_replaces_rather_than_appends() {
        let mut store = MemoryStore::new();
        let batch = vec![sample_mapping(), sample_mapping()];

        assert_eq!(store.store_mappings(&batch).unwrap(), 2);
        assert_eq!(store.store_mappings(&batch).unwrap(), 2);
        assert_eq!(store.mappings.len(), 2);
    }

    #[test]
    fn json_dir_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path());

        let batch = vec![sample_mapping()];
        assert_eq!(store.store_mappings(&batch).unwrap(), 1);

        let text = fs::read_to_string(dir.path().join(MAPPINGS_FILE)).unwrap();
        let read_back: Vec<Mapping> = serde_json::from_str(&text).unwrap();
        assert_eq!(read_back, batch);
    }

    #[test]
    fn json_dir_store_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path());
        let batch = vec![sample_mapping()];

        store.store_mappings(&batch).unwrap();
        let first = fs::read_to_string(dir.path().join(MAPPINGS_FILE)).unwrap();
        store.store_mappings(&batch).unwrap();
        let second = fs::read_to_string(dir.path().join(MAPPINGS_FILE)).unwrap();

        assert_eq!(first, second);
    }
}

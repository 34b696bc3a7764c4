use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Canonical three-character book identifier (USFM style: GEN, PSA, REV).
///
/// Construction validates shape only; membership in the known canon is the
/// book catalog's concern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ModelError::InvalidBookId(value));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Psalms gets special treatment throughout: verse 0 (the psalm title
    /// pseudo-verse) is legal there and nowhere else.
    pub fn is_psalms(&self) -> bool {
        self.0 == "PSA"
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Versification tradition name as it appears in the dataset
/// ("Latin", "Greek2", "English (KJV)", or the literal "standard").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tradition(String);

impl Tradition {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidTradition(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The target side of every mapping.
    pub fn standard() -> Self {
        Self("standard".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for pool lookups.
    pub fn lookup_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A deterministic row identifier.
///
/// A short, fixed-size binary ID rendered as lowercase hex; derived from the
/// input fingerprint and the row number so re-ingesting the same file yields
/// the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId([u8; 16]);

impl RowId {
    pub fn from_first_16_bytes_of_sha256(digest: [u8; 32]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl serde::Serialize for RowId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for RowId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 16 {
            return Err(serde::de::Error::custom("RowId must be 16 bytes"));
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#![deny(unsafe_code)]

pub mod books;
pub mod error;
pub mod hash;
pub mod verse_counts;

pub use crate::books::{BookCatalog, BookInfo, BookLookup, Section};
pub use crate::error::{Result, StandardsError};
pub use crate::hash::{sha256_digest, sha256_hex};
pub use crate::verse_counts::{DEFAULT_FALLBACK, VerseCounts};

#![deny(unsafe_code)]

//! Action processor: replays accepted mappings against a tradition's verse
//! pool in priority-tier order, producing the standardized text pool.

pub mod error;
pub mod pool;
pub mod processor;

pub use crate::error::{ApplyError, Result};
pub use crate::pool::{Claimed, PoolKey, StandardizedPool, StandardizedRow, VersePool};
pub use crate::processor::{ApplyOutcome, ApplyStats, apply_mappings};

//! Reference grammar parsing for the TVTMS dataset.
//!
//! Turns one raw reference token ("Rev.13:18(A)[=Rev.13:17]",
//! "Psa.68:1-3", "!a", "3:16") into structured [`Reference`] records plus
//! diagnostics. Parsing never fails; unmatched input yields an empty ref
//! list and a diagnostic destined for the log sink.
//!
//! [`Reference`]: tvtms_model::Reference

pub mod context;
pub mod grammar;
pub mod outcome;
pub mod verse_token;

pub use crate::context::ParseContext;
pub use crate::grammar::{TokenShape, classify, parse};
pub use crate::outcome::ParseOutcome;
pub use crate::verse_token::{CleanVerse, clean_verse_token};

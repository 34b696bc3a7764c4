#![deny(unsafe_code)]

//! Mapping builder, range expander, and the row-processing pipeline.

pub mod builder;
pub mod expander;
pub mod pipeline;
pub mod stats;

pub use crate::builder::{BuildOutcome, build_row, build_section_line};
pub use crate::expander::{Expansion, expand, parse_range_expression};
pub use crate::pipeline::{ProcessOutcome, StoreReport, process_document, store_outcome};
pub use crate::stats::PipelineStats;

#![deny(unsafe_code)]

//! Mapping and auxiliary-record validation.

pub mod issue;
pub mod validator;

pub use crate::issue::{Issue, Severity};
pub use crate::validator::{is_valid, validate_documentation, validate_mapping, validate_rule};

#![deny(unsafe_code)]

//! CLI library components for the TVTMS engine.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;

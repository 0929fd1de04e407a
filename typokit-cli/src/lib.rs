//! typokit CLI library
//!
//! Command implementations behind the `typokit` binary: batch processing
//! of files, inspection of the available language data and helpers for
//! writing new data files.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod language_source;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

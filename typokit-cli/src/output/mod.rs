//! Output formatting module

use std::path::PathBuf;

use anyhow::Result;
use typokit_core::Output;

/// Result of processing one input file
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub output: Output,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one processed file
    fn format_file(&mut self, file: &ProcessedFile) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

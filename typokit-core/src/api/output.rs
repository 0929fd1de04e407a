//! Output types for the facade

use std::time::Duration;

use crate::api::Mode;

/// Processed text with metadata
#[derive(Debug, Clone)]
pub struct Output {
    pub text: String,
    pub metadata: ProcessingMetadata,
}

/// How the text was processed
#[derive(Debug, Clone)]
pub struct ProcessingMetadata {
    pub duration: Duration,
    /// Code of the pattern set actually used, after fallback
    pub language: Option<String>,
    pub mode: Mode,
    pub is_html: bool,
    pub stats: ProcessingStats,
}

/// Size and word counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub bytes_in: usize,
    pub bytes_out: usize,
    /// Words seen by the hyphenator (0 when it did not run)
    pub words: usize,
    pub words_hyphenated: usize,
}

//! Language data sources for the CLI
//!
//! A `--data-dir` is searched before the built-in data, so a file there can
//! replace a bundled language as well as add a new one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use typokit_core::PatternRegistry;

/// Where language data comes from
#[derive(Debug, Clone, Default)]
pub struct LanguageSource {
    data_dir: Option<PathBuf>,
}

impl LanguageSource {
    /// Built-in data only
    pub fn builtin() -> Self {
        Self::default()
    }

    /// A data directory in front of the built-in data
    pub fn with_data_dir(data_dir: Option<PathBuf>) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Get the display name for the language source
    pub fn display_name(&self) -> String {
        match &self.data_dir {
            Some(dir) => format!("{} + built-in", dir.display()),
            None => "built-in".to_string(),
        }
    }

    /// Build the shared registry
    pub fn registry(&self) -> Result<Arc<PatternRegistry>> {
        let mut builder = PatternRegistry::builder();
        if let Some(dir) = &self.data_dir {
            if !dir.is_dir() {
                bail!("Data directory not found: {}", dir.display());
            }
            builder = builder.directory(dir.clone());
        }
        log::debug!("language data: {}", self.display_name());
        Ok(Arc::new(builder.embedded().build()))
    }
}

//! Configuration module
//!
//! The `[hyphenation]` and `[correction]` tables deserialize straight into
//! the core option structs, so every option the library knows is available
//! from a config file under the same name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use typokit_core::api::defaults;
use typokit_core::{CorrectionOptions, HyphenationOptions, Mode};

use crate::error::{CliError, CliResult};

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Hyphenation options
    #[serde(default)]
    pub hyphenation: HyphenationOptions,

    /// Correction options
    #[serde(default)]
    pub correction: CorrectionOptions,
}

/// Processing-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Language used when `--language` is not given
    pub default_language: String,

    /// Passes to run when `--mode` is not given
    pub mode: Mode,

    /// Directory with extra language data files
    pub data_dir: Option<PathBuf>,

    /// Number of worker threads (0 = one per CPU)
    pub worker_threads: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_language: defaults::LANGUAGE.to_string(),
            mode: Mode::default(),
            data_dir: None,
            worker_threads: 0,
        }
    }
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse TOML configuration text
    pub fn parse(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

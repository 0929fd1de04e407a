//! Validate command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use typokit_core::{LanguageData, PatternSet};

use crate::error::CliError;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the language data file (.toml or .json) to validate
    #[arg(short = 'd', long, value_name = "FILE", required = true)]
    pub data: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating language data: {}", self.data.display());

        match compile(&self.data) {
            Ok(set) => {
                println!("✓ Language data is valid!");
                println!("  Language code: {}", set.code());
                println!("  Language name: {}", set.name());
                println!("  Patterns: {}", set.pattern_count());
                println!(
                    "  Pattern lengths: {}..={}",
                    set.shortest_pattern(),
                    set.longest_pattern()
                );
                println!("  Exceptions: {}", set.exception_count());
                Ok(())
            }
            Err(e) => {
                println!("✗ Language data is invalid!");
                println!("  Error: {e}");
                Err(CliError::ValidationFailed(e.to_string()).into())
            }
        }
    }
}

/// Parse and compile a data file the same way the registry would
fn compile(path: &Path) -> typokit_core::Result<PatternSet> {
    let data = LanguageData::from_path(path)?;
    let code = data.metadata.code.clone();
    PatternSet::from_data(&code, data)
}

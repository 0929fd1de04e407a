//! CLI command implementations

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::language_source::LanguageSource;

pub mod generate_data;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Correct and hyphenate text or HTML files
    Process(process::ProcessArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Check a language data file
    Validate(validate::ValidateArgs),

    /// Write a language data template
    GenerateData(generate_data::GenerateDataArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available language data
    Languages {
        /// Directory with additional language data files
        #[arg(long, value_name = "DIR", env = "TYPOKIT_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateData(args) => args.execute(),
        }
    }
}

impl ListCommands {
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Languages { data_dir } => {
                let source = LanguageSource::with_data_dir(data_dir.clone());
                println!("Available languages ({}):", source.display_name());
                for line in language_lines(&source)? {
                    println!("  {line}");
                }
                Ok(())
            }
        }
    }
}

/// One `code - name` line per language; broken files are reported, not fatal
fn language_lines(source: &LanguageSource) -> Result<Vec<String>> {
    let registry = source.registry()?;
    Ok(registry
        .available_languages()
        .into_iter()
        .map(|code| match registry.get(&code) {
            Ok(set) => format!("{code:<8} - {}", set.name()),
            Err(e) => format!("{code:<8} - invalid ({e})"),
        })
        .collect())
}

//! Generate data command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-data command
#[derive(Debug, Args)]
pub struct GenerateDataArgs {
    /// Language code for the new data file
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateDataArgs {
    /// Execute the generate-data command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating language data template...");
        println!("  Language code: {}", self.language_code);
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Language data template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Replace the sample patterns with real ones for your language");
        println!("2. Validate the file:");
        println!("   typokit validate --data {}", self.output.display());
        println!("3. Put it in a data directory named <code>.toml and use it:");
        println!(
            "   typokit process -i input.txt -l {} --data-dir <DIR>",
            self.language_code
        );

        Ok(())
    }

    /// Generate template data file content
    fn generate_template(&self) -> String {
        let code = &self.language_code;
        format!(
            r#"# Language data for {code}

# Patterns in TeX notation: digits between letters are break levels,
# '.' marks a word boundary. Odd levels allow a break, even levels forbid it.
tex_patterns = [
    ".ex1a",
    "a1b",
    "2bb",
]

# Short words that should stay on the line of the following word
prepositions = []
conjunctions = []
abbreviations = []

[metadata]
code = "{code}"
name = "Custom Language"

# Patterns as key/levels pairs; a key of n characters takes up to n + 1
# digits, short digit strings are padded on the left with zeros.
# '_' marks a word boundary.
[patterns]
# "_ab" = "0100"

# Exceptions: lower-cased word -> spelling with '-' at every break.
[hyphenation]
# example = "ex-am-ple"
"#
        )
    }
}

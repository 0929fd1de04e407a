//! typokit command-line entry point

use anyhow::Result;
use clap::Parser;
use typokit_cli::commands::Commands;

#[derive(Debug, Parser)]
#[command(name = "typokit")]
#[command(about = "Hyphenation and typographic correction for text and HTML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

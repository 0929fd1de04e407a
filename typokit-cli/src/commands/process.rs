//! Process command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use typokit_core::{Input, Markup, Mode, Typographer};

use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader};
use crate::language_source::LanguageSource;
use crate::output::{JsonFormatter, OutputFormatter, ProcessedFile, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Language code for hyphenation patterns (default: from config, else "en")
    #[arg(short, long, value_name = "CODE", env = "TYPOKIT_LANGUAGE")]
    pub language: Option<String>,

    /// Passes to run (default: from config, else both)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Whether to treat input as HTML
    #[arg(long, value_enum, default_value = "auto")]
    pub html: HtmlMode,

    /// Directory with additional language data files
    #[arg(long, value_name = "DIR", env = "TYPOKIT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of worker threads (default: one per CPU)
    #[arg(short, long, value_name = "N", value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Processed text, one document after another
    Text,
    /// JSON array with the text and statistics of every file
    Json,
}

/// Processing passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Typographic correction only
    Correct,
    /// Hyphenation only
    Hyphenate,
    /// Correction followed by hyphenation
    Both,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Correct => Mode::Correct,
            ModeArg::Hyphenate => Mode::Hyphenate,
            ModeArg::Both => Mode::Both,
        }
    }
}

/// HTML handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HtmlMode {
    /// Detect tags in each file
    Auto,
    /// Always treat input as HTML
    On,
    /// Always treat input as plain text
    Off,
}

impl From<HtmlMode> for Markup {
    fn from(mode: HtmlMode) -> Self {
        match mode {
            HtmlMode::Auto => Markup::Auto,
            HtmlMode::On => Markup::Html,
            HtmlMode::Off => Markup::Plain,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let typographer = self.build_typographer(&config)?;
        let files = resolve_patterns(&self.input)?;
        let threads = self.thread_count(&config, files.len());

        let results = self.process_files(&typographer, &files, threads)?;
        self.write_results(&results)?;

        let hyphenated: usize = results
            .iter()
            .map(|f| f.output.metadata.stats.words_hyphenated)
            .sum();
        log::info!(
            "Processed {} files ({} words hyphenated) with {} threads",
            results.len(),
            hyphenated,
            threads
        );
        Ok(())
    }

    /// Combine command-line flags with the config file into a typographer
    fn build_typographer(&self, config: &CliConfig) -> Result<Typographer> {
        let language = self
            .language
            .clone()
            .unwrap_or_else(|| config.processing.default_language.clone());
        let mode = self.mode.map(Mode::from).unwrap_or(config.processing.mode);
        let data_dir = self
            .data_dir
            .clone()
            .or_else(|| config.processing.data_dir.clone());

        let registry = LanguageSource::with_data_dir(data_dir).registry()?;
        let typographer = Typographer::builder()
            .registry(registry)
            .language(language.as_str())
            .mode(mode)
            .markup(self.html.into())
            .hyphenation(config.hyphenation.clone())
            .correction(config.correction.clone())
            .build()
            .context("Invalid processing options")?;

        // Fail before touching any input when the language cannot be loaded
        if mode.hyphenates() {
            let set = typographer
                .patterns(&language)
                .with_context(|| format!("Language data not available: {language}"))?;
            log::info!("Using language data '{}' ({})", set.code(), set.name());
        }

        Ok(typographer)
    }

    fn thread_count(&self, config: &CliConfig, files: usize) -> usize {
        let configured = match config.processing.worker_threads {
            0 => None,
            n => Some(n),
        };
        self.threads
            .or(configured)
            .unwrap_or_else(num_cpus::get)
            .min(files)
            .max(1)
    }

    fn process_files(
        &self,
        typographer: &Typographer,
        files: &[PathBuf],
        threads: usize,
    ) -> Result<Vec<ProcessedFile>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to start worker threads")?;

        let mut progress = ProgressReporter::new(self.quiet || files.len() < 2);
        progress.init_files(files.len() as u64);

        let results = pool.install(|| {
            files
                .par_iter()
                .map(|path| -> Result<ProcessedFile> {
                    let file = process_file(typographer, path)?;
                    progress.file_completed(&path.display().to_string());
                    Ok(file)
                })
                .collect::<Result<Vec<_>>>()
        });

        progress.finish();
        results
    }

    fn write_results(&self, results: &[ProcessedFile]) -> Result<()> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        for file in results {
            formatter.format_file(file)?;
        }
        formatter.finish()
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("invalid thread count: {e}"))?;
    if n == 0 {
        return Err("Thread count must be greater than 0".to_string());
    }
    Ok(n)
}

fn process_file(typographer: &Typographer, path: &Path) -> Result<ProcessedFile> {
    let text = FileReader::read_text(path)?;
    let output = typographer
        .process(Input::from_text(text))
        .with_context(|| format!("Failed to process {}", path.display()))?;
    log::debug!(
        "{}: {} -> {} bytes in {:?}",
        path.display(),
        output.metadata.stats.bytes_in,
        output.metadata.stats.bytes_out,
        output.metadata.duration
    );
    Ok(ProcessedFile {
        path: path.to_path_buf(),
        output,
    })
}

//! Pattern data sources
//!
//! A source answers one question: given an exact language code, is there
//! data for it. Fallback between codes is the registry's job.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::language::config::{DataFormat, LanguageData};

/// Provider of raw language data
pub trait PatternSource: Send + Sync {
    /// Short label for log messages
    fn label(&self) -> String;

    /// Load data for exactly `code`; `Ok(None)` when this source has none
    fn load(&self, code: &str) -> Result<Option<LanguageData>>;

    /// Codes this source can provide
    fn languages(&self) -> Vec<String>;
}

macro_rules! embed_language_data {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

/// Data compiled into the binary
const EMBEDDED: &[(&str, &str)] = &[embed_language_data!(
    "en",
    "../../configs/languages/english.toml"
)];

/// Built-in language data
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSource;

impl PatternSource for EmbeddedSource {
    fn label(&self) -> String {
        "embedded".to_string()
    }

    fn load(&self, code: &str) -> Result<Option<LanguageData>> {
        let Some((_, content)) = EMBEDDED.iter().find(|(c, _)| *c == code) else {
            return Ok(None);
        };
        LanguageData::parse(code, content, DataFormat::Toml).map(Some)
    }

    fn languages(&self) -> Vec<String> {
        EMBEDDED.iter().map(|(c, _)| c.to_string()).collect()
    }
}

/// Data files in a directory, named `<code>.toml` or `<code>.json`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidate_files(&self, code: &str) -> impl Iterator<Item = PathBuf> + '_ {
        let code = code.to_string();
        [DataFormat::Toml, DataFormat::Json]
            .into_iter()
            .map(move |f| self.root.join(format!("{code}.{}", f.extension())))
    }
}

impl PatternSource for DirectorySource {
    fn label(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn load(&self, code: &str) -> Result<Option<LanguageData>> {
        // Codes become file names; refuse anything that could leave the root
        if code.is_empty() || code.contains(['/', '\\']) || code.starts_with('.') {
            return Ok(None);
        }

        for path in self.candidate_files(code) {
            if !path.is_file() {
                continue;
            }
            let format = DataFormat::from_path(&path).unwrap_or(DataFormat::Toml);
            let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            return LanguageData::parse(code, &content, format).map(Some);
        }
        Ok(None)
    }

    fn languages(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut codes: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && DataFormat::from_path(path).is_some())
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }
}

/// In-memory data, mostly for embedding applications and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: HashMap<String, LanguageData>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, code: impl Into<String>, data: LanguageData) -> Self {
        self.data.insert(code.into(), data);
        self
    }
}

impl PatternSource for MemorySource {
    fn label(&self) -> String {
        "memory".to_string()
    }

    fn load(&self, code: &str) -> Result<Option<LanguageData>> {
        Ok(self.data.get(code).cloned())
    }

    fn languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.data.keys().cloned().collect();
        codes.sort();
        codes
    }
}

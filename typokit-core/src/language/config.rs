//! Language data structures
//!
//! This module defines the on-disk schema for per-language pattern data.
//! TOML and JSON are both accepted; the logical structure is the same.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Root language data document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageData {
    #[serde(default)]
    pub metadata: Metadata,
    /// Pattern key -> level digits
    #[serde(default)]
    pub patterns: BTreeMap<String, LevelSpec>,
    /// Raw TeX-notation patterns such as `hy3ph`
    #[serde(default)]
    pub tex_patterns: Vec<String>,
    /// Lower-cased word -> hyphen-marked spelling
    #[serde(default)]
    pub hyphenation: BTreeMap<String, String>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
    #[serde(default)]
    pub conjunctions: Vec<String>,
    #[serde(default)]
    pub prepositions: Vec<String>,
}

/// Language metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Level vector as it appears in a data file
///
/// Exporters that store the digits as numbers lose leading zeros, so both
/// forms are accepted and short vectors are padded on the left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Digits(String),
    Number(u64),
}

impl LevelSpec {
    pub(crate) fn digits(&self) -> String {
        match self {
            LevelSpec::Digits(s) => s.trim().to_string(),
            LevelSpec::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for LevelSpec {
    fn from(s: &str) -> Self {
        LevelSpec::Digits(s.to_string())
    }
}

/// Serialization format of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Toml,
    Json,
}

impl DataFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(DataFormat::Toml),
            "json" => Some(DataFormat::Json),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Toml => "toml",
            DataFormat::Json => "json",
        }
    }
}

impl LanguageData {
    /// Empty data document for `code`
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                code: code.into(),
                name: String::new(),
            },
            ..Default::default()
        }
    }

    /// Add a pattern in key/digits form
    pub fn with_pattern(mut self, key: impl Into<String>, levels: impl Into<LevelSpec>) -> Self {
        self.patterns.insert(key.into(), levels.into());
        self
    }

    /// Add TeX-notation patterns
    pub fn with_tex_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tex_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add an exception word
    pub fn with_exception(mut self, word: impl Into<String>, spelling: impl Into<String>) -> Self {
        self.hyphenation.insert(word.into(), spelling.into());
        self
    }

    pub fn with_conjunctions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conjunctions.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_prepositions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prepositions.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_abbreviations<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations.extend(words.into_iter().map(Into::into));
        self
    }

    /// Parse a data document; `code` is only used in error messages
    pub fn parse(code: &str, content: &str, format: DataFormat) -> Result<Self> {
        match format {
            DataFormat::Toml => toml::from_str(content)
                .map_err(|e| Error::invalid_data(code, format!("failed to parse TOML: {e}"))),
            DataFormat::Json => serde_json::from_str(content)
                .map_err(|e| Error::invalid_data(code, format!("failed to parse JSON: {e}"))),
        }
    }

    /// Read and parse a data file, inferring the format from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let format = DataFormat::from_path(path).ok_or_else(|| {
            Error::invalid_data(
                &label,
                format!("unsupported file extension: {}", path.display()),
            )
        })?;
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut data = Self::parse(&label, &content, format)?;
        if data.metadata.code.is_empty() {
            data.metadata.code = label;
        }
        Ok(data)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::invalid_data(&self.metadata.code, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_with_all_sections() {
        let content = r#"
tex_patterns = ["hy3ph"]
abbreviations = ["Dr."]
conjunctions = ["and"]
prepositions = ["of"]

[metadata]
code = "xx"
name = "Test"

[patterns]
"_hy" = "0030"
"ph" = 10

[hyphenation]
table = "ta-ble"
"#;
        let data = LanguageData::parse("xx", content, DataFormat::Toml).unwrap();
        assert_eq!(data.metadata.code, "xx");
        assert_eq!(data.patterns["_hy"], LevelSpec::Digits("0030".into()));
        assert_eq!(data.patterns["ph"], LevelSpec::Number(10));
        assert_eq!(data.hyphenation["table"], "ta-ble");
        assert_eq!(data.tex_patterns, vec!["hy3ph"]);
    }

    #[test]
    fn test_parse_json_without_metadata() {
        let content = r#"{
            "patterns": {"hy": "1", "ph": "0"},
            "hyphenation": {},
            "abbreviations": [],
            "conjunctions": ["a"],
            "prepositions": ["v"]
        }"#;
        let data = LanguageData::parse("cs", content, DataFormat::Json).unwrap();
        assert!(data.metadata.code.is_empty());
        assert_eq!(data.patterns.len(), 2);
        assert_eq!(data.prepositions, vec!["v"]);
    }

    #[test]
    fn test_parse_error_mentions_code() {
        match LanguageData::parse("de", "patterns = [", DataFormat::Toml) {
            Err(Error::InvalidData { code, reason }) => {
                assert_eq!(code, "de");
                assert!(reason.contains("TOML"));
            }
            other => panic!("Expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("en.toml")), Some(DataFormat::Toml));
        assert_eq!(DataFormat::from_path(Path::new("en.JSON")), Some(DataFormat::Json));
        assert_eq!(DataFormat::from_path(Path::new("en.bin")), None);
    }

    #[test]
    fn test_toml_round_trip_keeps_patterns() {
        let data = LanguageData::new("xx")
            .with_pattern("hy", "010")
            .with_exception("table", "ta-ble");
        let text = data.to_toml_string().unwrap();
        let parsed = LanguageData::parse("xx", &text, DataFormat::Toml).unwrap();
        assert_eq!(parsed, data);
    }
}

//! Configuration for the [`Typographer`](crate::api::Typographer) facade

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::correction::CorrectionOptions;
use crate::error::{Error, Result};
use crate::hyphenation::HyphenationOptions;

/// Default configuration constants
pub mod defaults {
    /// Language used when none is given
    pub const LANGUAGE: &str = "en";
}

/// Which passes [`Typographer::process`](crate::api::Typographer::process) runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Correct,
    Hyphenate,
    /// Correct, then hyphenate the corrected text
    #[default]
    Both,
}

impl Mode {
    pub fn corrects(self) -> bool {
        matches!(self, Mode::Correct | Mode::Both)
    }

    pub fn hyphenates(self) -> bool {
        matches!(self, Mode::Hyphenate | Mode::Both)
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correct" => Ok(Mode::Correct),
            "hyphenate" => Ok(Mode::Hyphenate),
            "both" => Ok(Mode::Both),
            other => Err(Error::InvalidOption(format!(
                "unknown mode '{other}', expected correct, hyphenate or both"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Correct => "correct",
            Mode::Hyphenate => "hyphenate",
            Mode::Both => "both",
        })
    }
}

/// How [`Typographer::process`](crate::api::Typographer::process) decides
/// whether input is HTML
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// Probe the input for tags
    #[default]
    Auto,
    Html,
    Plain,
}

impl Markup {
    /// Resolve to a yes/no answer, using `detect` for [`Markup::Auto`]
    pub fn is_html(self, detect: impl FnOnce() -> bool) -> bool {
        match self {
            Markup::Auto => detect(),
            Markup::Html => true,
            Markup::Plain => false,
        }
    }
}

/// Processing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) language: String,
    pub(crate) mode: Mode,
    pub(crate) markup: Markup,
    pub(crate) hyphenation: HyphenationOptions,
    pub(crate) correction: CorrectionOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: defaults::LANGUAGE.to_string(),
            mode: Mode::default(),
            markup: Markup::default(),
            hyphenation: HyphenationOptions::default(),
            correction: CorrectionOptions::default(),
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn markup(&self) -> Markup {
        self.markup
    }

    pub fn hyphenation(&self) -> &HyphenationOptions {
        &self.hyphenation
    }

    pub fn correction(&self) -> &CorrectionOptions {
        &self.correction
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(Error::InvalidOption("language must not be empty".into()));
        }
        self.hyphenation.validate()?;
        self.correction.validate()
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    language: Option<String>,
    mode: Option<Mode>,
    markup: Option<Markup>,
    hyphenation: Option<HyphenationOptions>,
    correction: Option<CorrectionOptions>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default language code
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn markup(mut self, markup: Markup) -> Self {
        self.markup = Some(markup);
        self
    }

    pub fn hyphenation(mut self, options: HyphenationOptions) -> Self {
        self.hyphenation = Some(options);
        self
    }

    pub fn correction(mut self, options: CorrectionOptions) -> Self {
        self.correction = Some(options);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(code) = self.language {
            config.language = code.trim().to_string();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(markup) = self.markup {
            config.markup = markup;
        }
        if let Some(options) = self.hyphenation {
            config.hyphenation = options;
        }
        if let Some(options) = self.correction {
            config.correction = options;
        }

        config.validate()?;
        Ok(config)
    }
}

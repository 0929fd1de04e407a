//! Hyphenation options

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Discrete quality thresholds
///
/// A break is taken when its odd score is at most the threshold, so lower
/// values keep only the most reliable breaks.
pub mod quality {
    pub const LOWEST: u8 = 1;
    pub const LOW: u8 = 3;
    pub const NORMAL: u8 = 5;
    pub const HIGH: u8 = 7;
    pub const HIGHEST: u8 = 9;

    pub const LEVELS: [u8; 5] = [LOWEST, LOW, NORMAL, HIGH, HIGHEST];
}

/// Default option values
pub mod defaults {
    pub const LEFT_MARGIN: usize = 2;
    pub const RIGHT_MARGIN: usize = 2;
    pub const MIN_WORD_LENGTH: usize = 6;
    pub const CUSTOM_HYPHEN: &str = "--";
    pub const NO_HYPHENATE_MARKER: &str = "##";
    pub const SOFT_HYPHEN: &str = "\u{AD}";
    pub const CUSTOMIZED_MARKER: &str = "*";
    pub const NBSP: &str = "\u{A0}";
    pub const SPECIAL_SEPARATORS: &[&str] = &["/-", "-"];
    pub const SPECIAL_CHARS: &str =
        ".,;:!?'\"()[]{}<>/\\|@#$%^&*+=~_`«»„“”‘’‚‹›…–—¿¡";
    pub const SKIP_TAGS: &[&str] = &["pre", "code", "script", "style", "head"];
}

/// Options for word and text hyphenation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyphenationOptions {
    pub quality: u8,
    pub left_margin: usize,
    pub right_margin: usize,
    pub min_word_length: usize,
    pub custom_hyphen: String,
    pub no_hyphenate_marker: String,
    pub hyphen: String,
    pub mark_customized: bool,
    pub customized_marker: String,
    pub special_separators: Vec<String>,
    pub special_chars: String,
    pub skip_tags: Vec<String>,
    /// `(shortest, longest)` pattern lengths to try; `None` uses the set's own
    pub pattern_window: Option<(usize, usize)>,
    pub bind_words: bool,
    pub nbsp: String,
}

impl Default for HyphenationOptions {
    fn default() -> Self {
        Self {
            quality: quality::HIGHEST,
            left_margin: defaults::LEFT_MARGIN,
            right_margin: defaults::RIGHT_MARGIN,
            min_word_length: defaults::MIN_WORD_LENGTH,
            custom_hyphen: defaults::CUSTOM_HYPHEN.to_string(),
            no_hyphenate_marker: defaults::NO_HYPHENATE_MARKER.to_string(),
            hyphen: defaults::SOFT_HYPHEN.to_string(),
            mark_customized: false,
            customized_marker: defaults::CUSTOMIZED_MARKER.to_string(),
            special_separators: defaults::SPECIAL_SEPARATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            special_chars: defaults::SPECIAL_CHARS.to_string(),
            skip_tags: defaults::SKIP_TAGS.iter().map(|s| s.to_string()).collect(),
            pattern_window: None,
            bind_words: false,
            nbsp: defaults::NBSP.to_string(),
        }
    }
}

impl HyphenationOptions {
    pub fn builder() -> HyphenationOptionsBuilder {
        HyphenationOptionsBuilder::default()
    }

    /// Check every option against its domain
    pub fn validate(&self) -> Result<()> {
        if !quality::LEVELS.contains(&self.quality) {
            return Err(Error::InvalidOption(format!(
                "quality must be one of {:?}, got {}",
                quality::LEVELS,
                self.quality
            )));
        }

        if self.hyphen.is_empty() {
            return Err(Error::InvalidOption("hyphen must not be empty".into()));
        }

        if let Some((shortest, longest)) = self.pattern_window {
            if shortest == 0 {
                return Err(Error::InvalidOption(
                    "pattern_window shortest length must be greater than 0".into(),
                ));
            }
            if shortest > longest {
                return Err(Error::InvalidOption(format!(
                    "pattern_window is empty: shortest {shortest} > longest {longest}"
                )));
            }
        }

        if self.special_separators.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidOption(
                "special_separators must not contain empty strings".into(),
            ));
        }

        if self.mark_customized && self.customized_marker.is_empty() {
            return Err(Error::InvalidOption(
                "customized_marker must not be empty when mark_customized is set".into(),
            ));
        }

        Ok(())
    }

    pub(crate) fn is_special(&self, ch: char) -> bool {
        self.special_chars.contains(ch)
    }
}

/// Fluent builder for [`HyphenationOptions`]
#[derive(Debug, Default)]
pub struct HyphenationOptionsBuilder {
    options: HyphenationOptions,
}

impl HyphenationOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.options.quality = quality;
        self
    }

    /// Minimum chars before the first and after the last break
    pub fn margins(mut self, left: usize, right: usize) -> Self {
        self.options.left_margin = left;
        self.options.right_margin = right;
        self
    }

    pub fn min_word_length(mut self, length: usize) -> Self {
        self.options.min_word_length = length;
        self
    }

    pub fn custom_hyphen(mut self, marker: impl Into<String>) -> Self {
        self.options.custom_hyphen = marker.into();
        self
    }

    pub fn no_hyphenate_marker(mut self, marker: impl Into<String>) -> Self {
        self.options.no_hyphenate_marker = marker.into();
        self
    }

    pub fn hyphen(mut self, glyph: impl Into<String>) -> Self {
        self.options.hyphen = glyph.into();
        self
    }

    /// Prefix manually hyphenated words with `marker`
    pub fn mark_customized(mut self, marker: impl Into<String>) -> Self {
        self.options.mark_customized = true;
        self.options.customized_marker = marker.into();
        self
    }

    pub fn special_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.special_separators = separators.into_iter().map(Into::into).collect();
        self
    }

    pub fn special_chars(mut self, chars: impl Into<String>) -> Self {
        self.options.special_chars = chars.into();
        self
    }

    pub fn skip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.skip_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn pattern_window(mut self, shortest: usize, longest: usize) -> Self {
        self.options.pattern_window = Some((shortest, longest));
        self
    }

    pub fn bind_words(mut self, enabled: bool) -> Self {
        self.options.bind_words = enabled;
        self
    }

    pub fn nbsp(mut self, glyph: impl Into<String>) -> Self {
        self.options.nbsp = glyph.into();
        self
    }

    pub fn build(self) -> Result<HyphenationOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = HyphenationOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.quality, 9);
        assert_eq!(options.hyphen, "\u{AD}");
        assert_eq!(options.special_separators, vec!["/-", "-"]);
    }

    #[test]
    fn test_quality_must_be_a_defined_level() {
        for q in quality::LEVELS {
            assert!(HyphenationOptions::builder().quality(q).build().is_ok());
        }
        for q in [0, 2, 4, 8, 10] {
            match HyphenationOptions::builder().quality(q).build() {
                Err(Error::InvalidOption(msg)) => assert!(msg.contains("quality")),
                other => panic!("Expected InvalidOption for {q}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_pattern_window_validation() {
        assert!(HyphenationOptions::builder()
            .pattern_window(2, 8)
            .build()
            .is_ok());
        assert!(HyphenationOptions::builder()
            .pattern_window(0, 8)
            .build()
            .is_err());
        assert!(HyphenationOptions::builder()
            .pattern_window(5, 3)
            .build()
            .is_err());
    }

    #[test]
    fn test_empty_hyphen_is_rejected() {
        assert!(HyphenationOptions::builder().hyphen("").build().is_err());
    }

    #[test]
    fn test_empty_separator_is_rejected() {
        assert!(HyphenationOptions::builder()
            .special_separators(["/", ""])
            .build()
            .is_err());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let options: HyphenationOptions = toml::from_str(
            r#"
quality = 5
left_margin = 3
hyphen = "&shy;"
"#,
        )
        .unwrap();
        assert_eq!(options.quality, 5);
        assert_eq!(options.left_margin, 3);
        assert_eq!(options.right_margin, defaults::RIGHT_MARGIN);
        assert_eq!(options.hyphen, "&shy;");
    }
}

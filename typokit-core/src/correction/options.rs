//! Text correction options

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Elements that do not break a paragraph
pub const DEFAULT_INLINE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdi", "bdo", "big", "br", "cite", "code", "del", "dfn", "em",
    "i", "img", "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strike",
    "strong", "sub", "sup", "time", "tt", "u", "var", "wbr",
];

/// Elements whose content is never corrected
pub const DEFAULT_SKIP_TAGS: &[&str] = &[
    "pre", "code", "kbd", "samp", "script", "style", "textarea", "head",
];

/// Options for the correction pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionOptions {
    /// Collapse three or more newlines into a blank line
    pub collapse_newlines: bool,
    /// Turn blank-line separated text into `<p>` elements
    pub paragraphs: bool,
    /// Leave `{...}` placeholders alone in HTML input
    pub protect_braces: bool,
    /// Drop `<p></p>` instead of filling it with `&nbsp;`
    pub remove_empty_paragraphs: bool,
    pub inline_tags: Vec<String>,
    pub skip_tags: Vec<String>,
}

impl Default for CorrectionOptions {
    fn default() -> Self {
        Self {
            collapse_newlines: true,
            paragraphs: false,
            protect_braces: true,
            remove_empty_paragraphs: true,
            inline_tags: DEFAULT_INLINE_TAGS.iter().map(|s| s.to_string()).collect(),
            skip_tags: DEFAULT_SKIP_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CorrectionOptions {
    pub fn builder() -> CorrectionOptionsBuilder {
        CorrectionOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        for (field, tags) in [("inline_tags", &self.inline_tags), ("skip_tags", &self.skip_tags)] {
            if let Some(bad) = tags.iter().find(|t| !is_valid_tag_name(t)) {
                return Err(Error::InvalidOption(format!(
                    "{field} contains an invalid tag name: {bad:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_valid_tag_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

/// Fluent builder for [`CorrectionOptions`]
#[derive(Debug, Default)]
pub struct CorrectionOptionsBuilder {
    options: CorrectionOptions,
}

impl CorrectionOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collapse_newlines(mut self, enabled: bool) -> Self {
        self.options.collapse_newlines = enabled;
        self
    }

    pub fn paragraphs(mut self, enabled: bool) -> Self {
        self.options.paragraphs = enabled;
        self
    }

    pub fn protect_braces(mut self, enabled: bool) -> Self {
        self.options.protect_braces = enabled;
        self
    }

    pub fn remove_empty_paragraphs(mut self, enabled: bool) -> Self {
        self.options.remove_empty_paragraphs = enabled;
        self
    }

    pub fn inline_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.inline_tags = tags.into_iter().map(Into::into).collect();
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

    pub fn build(self) -> Result<CorrectionOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

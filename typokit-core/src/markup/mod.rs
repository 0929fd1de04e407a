//! Markup-aware tokenization
//!
//! Text is cut into [`Token`]s that borrow from the input. Only
//! [`Token::Word`] carries prose; everything else is copied through as is.

pub mod tokenizer;

pub use tokenizer::Tokenizer;

use regex::Regex;

use crate::error::{Error, Result};

/// Probe used to decide whether input is HTML
pub(crate) const HTML_PROBE: &str = r"</?[A-Za-z!][^>]*>";

/// A whole tag, as cut out by the regex-based passes
pub(crate) const TAG: &str = r"</?[A-Za-z!?][^>]*>";

/// One lexical unit of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Whitespace(&'a str),
    OpeningTag(&'a str),
    ClosingTag(&'a str),
    Entity(&'a str),
    Comment(&'a str),
    /// Content of a skip element, or an unterminated tag
    Raw(&'a str),
}

impl<'a> Token<'a> {
    /// Source slice the token was cut from
    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::Word(s)
            | Token::Whitespace(s)
            | Token::OpeningTag(s)
            | Token::ClosingTag(s)
            | Token::Entity(s)
            | Token::Comment(s)
            | Token::Raw(s) => s,
        }
    }
}

pub(crate) fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::InvalidOption(format!("invalid pattern '{pattern}': {e}")))
}

/// Lower-cased element name of a tag like `<p class="x">` or `</P>`
pub fn tag_name(tag: &str) -> Option<String> {
    let inner = tag.strip_prefix('<')?;
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    let name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
        .collect();
    (!name.is_empty()).then(|| name.to_ascii_lowercase())
}

/// Whether `s` opens with `&` and closes with `;`, like `&bdquo;word&ldquo;`
///
/// In markup such a run is kept whole and never hyphenated.
pub fn is_entity_run(s: &str) -> bool {
    s.len() > 2 && s.starts_with('&') && s.ends_with(';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name("<p>").as_deref(), Some("p"));
        assert_eq!(tag_name("</PRE>").as_deref(), Some("pre"));
        assert_eq!(tag_name("<a href=\"x\">").as_deref(), Some("a"));
        assert_eq!(tag_name("<br/>").as_deref(), Some("br"));
        assert_eq!(tag_name("<!DOCTYPE html>"), None);
        assert_eq!(tag_name("plain"), None);
    }

    #[test]
    fn test_is_entity_run() {
        assert!(is_entity_run("&nbsp;"));
        assert!(is_entity_run("&bdquo;hyphen&ldquo;"));
        assert!(is_entity_run("&ldquo;associate&rdquo;"));
        assert!(!is_entity_run("&;"));
        assert!(!is_entity_run("&bdquo;hyphen"));
        assert!(!is_entity_run("word&nbsp;"));
    }

    #[test]
    fn test_token_as_str() {
        assert_eq!(Token::Word("abc").as_str(), "abc");
        assert_eq!(Token::Raw("<x").as_str(), "<x");
        assert_eq!(Token::Entity("&bdquo;a&ldquo;").as_str(), "&bdquo;a&ldquo;");
    }
}

//! Single-pass tokenizer for plain text and HTML

use std::collections::HashSet;

use regex::Regex;

use crate::error::Result;
use crate::markup::{compile_regex, is_entity_run, tag_name, Token, HTML_PROBE};

/// Elements whose content may contain `<` without starting markup
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Tokenizer that knows which elements to leave untouched
#[derive(Debug, Clone)]
pub struct Tokenizer {
    skip_tags: HashSet<String>,
    probe: Regex,
}

impl Tokenizer {
    pub fn new<I, S>(skip_tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            skip_tags: skip_tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            probe: compile_regex(HTML_PROBE)?,
        })
    }

    /// Whether `text` contains anything that looks like a tag
    pub fn is_html(&self, text: &str) -> bool {
        self.probe.is_match(text)
    }

    pub fn tokenize<'a>(&self, text: &'a str, is_html: bool) -> Vec<Token<'a>> {
        if is_html {
            self.tokenize_html(text)
        } else {
            tokenize_plain(text)
        }
    }

    /// Rebuild `text`, passing every word through `word_fn`
    pub fn process<F>(&self, text: &str, is_html: bool, mut word_fn: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::with_capacity(text.len() + text.len() / 8);
        for token in self.tokenize(text, is_html) {
            match token {
                Token::Word(word) => out.push_str(&word_fn(word)),
                other => out.push_str(other.as_str()),
            }
        }
        out
    }

    fn tokenize_html<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut skip_stack: Vec<String> = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];

            if let Some(top) = skip_stack.last() {
                if RAW_TEXT_ELEMENTS.contains(&top.as_str()) {
                    match find_closing_tag(rest, top) {
                        Some(0) => {}
                        Some(end) => {
                            tokens.push(Token::Raw(&rest[..end]));
                            pos += end;
                            continue;
                        }
                        None => {
                            tokens.push(Token::Raw(rest));
                            break;
                        }
                    }
                }
            }

            if rest.starts_with("<!--") {
                match rest[4..].find("-->") {
                    Some(end) => {
                        let end = end + 7;
                        tokens.push(Token::Comment(&rest[..end]));
                        pos += end;
                    }
                    None => {
                        tokens.push(Token::Raw(rest));
                        break;
                    }
                }
                continue;
            }

            if starts_tag(rest) {
                let Some(end) = tag_end(rest) else {
                    tokens.push(Token::Raw(rest));
                    break;
                };
                let tag = &rest[..end];
                if tag.starts_with("</") {
                    if let Some(name) = tag_name(tag) {
                        if let Some(idx) = skip_stack.iter().rposition(|open| *open == name) {
                            skip_stack.truncate(idx);
                        }
                    }
                    tokens.push(Token::ClosingTag(tag));
                } else {
                    if let Some(name) = tag_name(tag) {
                        if self.skip_tags.contains(&name) && !tag.ends_with("/>") {
                            skip_stack.push(name);
                        }
                    }
                    tokens.push(Token::OpeningTag(tag));
                }
                pos += end;
                continue;
            }

            if !skip_stack.is_empty() {
                let end = next_markup(rest);
                tokens.push(Token::Raw(&rest[..end]));
                pos += end;
                continue;
            }

            let first = rest.chars().next().unwrap_or(' ');
            if first.is_whitespace() {
                let end = whitespace_end(rest);
                tokens.push(Token::Whitespace(&rest[..end]));
                pos += end;
            } else {
                let end = word_end(rest, true);
                let word = &rest[..end];
                if is_entity_run(word) {
                    tokens.push(Token::Entity(word));
                } else {
                    tokens.push(Token::Word(word));
                }
                pos += end;
            }
        }

        tokens
    }
}

fn tokenize_plain(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let first = rest.chars().next().unwrap_or(' ');
        let end = if first.is_whitespace() {
            let end = whitespace_end(rest);
            tokens.push(Token::Whitespace(&rest[..end]));
            end
        } else {
            let end = word_end(rest, false);
            tokens.push(Token::Word(&rest[..end]));
            end
        };
        pos += end;
    }
    tokens
}

/// `<` followed by a letter, `/letter`, `!` or `?`
fn starts_tag(s: &str) -> bool {
    let mut chars = s.chars();
    if chars.next() != Some('<') {
        return false;
    }
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '!' || c == '?' => true,
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

fn starts_markup(s: &str) -> bool {
    s.starts_with("<!--") || starts_tag(s)
}

/// Byte offset just past the `>` closing the tag at the start of `s`
///
/// Quotes only count when they open an attribute value (`name="..."`).
fn tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev_significant = '<';

    for (i, c) in s.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' if prev_significant == '=' => quote = Some(c),
                '>' => return Some(i + 1),
                _ => {}
            },
        }
        if !c.is_whitespace() {
            prev_significant = c;
        }
    }
    None
}

/// Offset of the closing `</name` in `s`, ignoring case
fn find_closing_tag(s: &str, name: &str) -> Option<usize> {
    let needle = format!("</{name}");
    s.to_ascii_lowercase().find(&needle)
}

fn next_markup(s: &str) -> usize {
    s.match_indices('<')
        .map(|(i, _)| i)
        .find(|&i| i > 0 && starts_markup(&s[i..]))
        .unwrap_or(s.len())
}

fn whitespace_end(s: &str) -> usize {
    s.char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(s.len(), |(i, _)| i)
}

fn word_end(s: &str, html: bool) -> usize {
    s.char_indices()
        .find(|&(i, c)| c.is_whitespace() || (html && i > 0 && c == '<' && starts_markup(&s[i..])))
        .map_or(s.len(), |(i, _)| i)
}

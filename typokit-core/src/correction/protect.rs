//! Placeholders that hide text from the correction rules
//!
//! Characters the rules react to are swapped for private-use code points
//! and swapped back once the rules have run. Comments are lifted out whole.
//! Private-use code points already present in the input are parked behind
//! [`LITERAL`] first so they never pass for a placeholder.

use regex::{Captures, Regex};

use crate::error::Result;
use crate::markup::compile_regex;

const PROTECTED: &[(char, char)] = &[
    ('"', '\u{E001}'),
    ('\'', '\u{E002}'),
    ('-', '\u{E003}'),
    ('.', '\u{E004}'),
    ('&', '\u{E005}'),
    ('!', '\u{E006}'),
    ('?', '\u{E007}'),
    (' ', '\u{E008}'),
    ('\t', '\u{E009}'),
];

/// Stand-in for the `<` of an inline tag
pub(crate) const INLINE_OPEN: char = '\u{E030}';

/// A dot the ellipsis rules must not see again
pub(crate) const PROTECTED_DOT: char = '\u{E004}';

const COMMENT_START: char = '\u{E020}';
const COMMENT_END: char = '\u{E021}';

/// Stand-in for a reserved code point that came with the input
const LITERAL: char = '\u{E03F}';

fn is_reserved(c: char) -> bool {
    ('\u{E000}'..=LITERAL).contains(&c)
}

/// Replace every protected character in `s` with its placeholder
pub(crate) fn protect(s: &str) -> String {
    s.chars()
        .map(|c| {
            PROTECTED
                .iter()
                .find(|(plain, _)| *plain == c)
                .map_or(c, |(_, hidden)| *hidden)
        })
        .collect()
}

/// Undo [`protect`] and inline tag marking
pub(crate) fn restore(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c == INLINE_OPEN {
                return '<';
            }
            PROTECTED
                .iter()
                .find(|(_, hidden)| *hidden == c)
                .map_or(c, |(plain, _)| *plain)
        })
        .collect()
}

/// Protect the whole match of `regex`, or only `group` when given
pub(crate) fn protect_matches(text: &str, regex: &Regex, group: Option<usize>) -> String {
    regex
        .replace_all(text, |caps: &Captures<'_>| match group {
            None => protect(&caps[0]),
            Some(g) => {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let Some(inner) = caps.get(g) else {
                    return whole.to_string();
                };
                let start = inner.start() - caps.get(0).map_or(0, |m| m.start());
                let end = start + inner.len();
                format!(
                    "{}{}{}",
                    &whole[..start],
                    protect(inner.as_str()),
                    &whole[end..]
                )
            }
        })
        .into_owned()
}

#[derive(Debug, Clone)]
struct StashedComment {
    text: String,
    standalone: bool,
}

/// Comments lifted out of the text
#[derive(Debug, Default)]
pub(crate) struct CommentStash {
    comments: Vec<StashedComment>,
}

impl CommentStash {
    pub(crate) fn placeholder(idx: usize) -> String {
        format!("{COMMENT_START}{idx}{COMMENT_END}")
    }

    /// Replace every comment matched by `regex` with a placeholder
    pub(crate) fn stash(&mut self, text: &str, regex: &Regex) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in regex.find_iter(text) {
            let standalone = (m.start() == 0 || text[..m.start()].ends_with('\n'))
                && (m.end() == text.len() || text[m.end()..].starts_with('\n'));
            out.push_str(&text[last..m.start()]);
            out.push_str(&Self::placeholder(self.comments.len()));
            self.comments.push(StashedComment {
                text: m.as_str().to_string(),
                standalone,
            });
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }

    /// Put the comments back, unwrapping standalone ones from `<p>`
    pub(crate) fn restore(&self, mut text: String) -> String {
        for (idx, comment) in self.comments.iter().enumerate() {
            let placeholder = Self::placeholder(idx);
            if comment.standalone {
                let wrapped = format!("<p>{placeholder}</p>");
                text = text.replace(&wrapped, &comment.text);
            }
            text = text.replace(&placeholder, &comment.text);
        }
        text
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Reserved code points taken out of the input, in order of appearance
#[derive(Debug, Default)]
pub(crate) struct Literals {
    chars: Vec<char>,
}

impl Literals {
    /// Replace every reserved code point in `text` with [`LITERAL`]
    pub(crate) fn escape(&mut self, text: String) -> String {
        if !text.chars().any(is_reserved) {
            return text;
        }
        text.chars()
            .map(|c| {
                if is_reserved(c) {
                    self.chars.push(c);
                    LITERAL
                } else {
                    c
                }
            })
            .collect()
    }

    /// Put the escaped code points back
    pub(crate) fn unescape(&self, text: String) -> String {
        if self.chars.is_empty() {
            return text;
        }
        let mut originals = self.chars.iter().copied();
        text.chars()
            .map(|c| {
                if c == LITERAL {
                    originals.next().unwrap_or(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

/// Regex for `<!-- ... -->`
pub(crate) fn comment_regex() -> Result<Regex> {
    compile_regex(r"(?s)<!--.*?-->")
}

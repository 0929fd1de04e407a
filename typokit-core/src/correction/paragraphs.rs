//! Newline to `<p>` / `<br />` conversion

use std::collections::HashSet;

use regex::Regex;

use crate::error::Result;
use crate::markup::{compile_regex, tag_name, TAG};

/// Elements without content or closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Paragraph builder over tag/content chunks
#[derive(Debug, Clone)]
pub(crate) struct Paragraphs {
    tag: Regex,
    blank_line: Regex,
    skip_tags: HashSet<String>,
}

impl Paragraphs {
    pub(crate) fn new(skip_tags: &HashSet<String>) -> Result<Self> {
        Ok(Self {
            tag: compile_regex(TAG)?,
            blank_line: compile_regex(r"\n[ \t]*\n\s*")?,
            skip_tags: skip_tags.clone(),
        })
    }

    /// Wrap text outside block elements in paragraphs
    ///
    /// Inline tags must already be masked so that only block-level and
    /// skip tags split the text.
    pub(crate) fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut skip_stack: Vec<String> = Vec::new();
        let mut depth = 0usize;
        let mut last = 0;

        for m in self.tag.find_iter(text) {
            let content = &text[last..m.start()];
            out.push_str(&self.content(content, depth, !skip_stack.is_empty()));

            let tag = m.as_str();
            if let Some(name) = tag_name(tag) {
                let closing = tag.starts_with("</");
                let self_closing = tag.ends_with("/>");
                if self.skip_tags.contains(&name) && !self_closing {
                    if closing {
                        if let Some(idx) = skip_stack.iter().rposition(|open| *open == name) {
                            skip_stack.truncate(idx);
                        }
                    } else {
                        skip_stack.push(name.clone());
                    }
                }
                if !VOID_ELEMENTS.contains(&name.as_str()) && !self_closing {
                    if closing {
                        depth = depth.saturating_sub(1);
                    } else {
                        depth += 1;
                    }
                }
            }
            out.push_str(tag);
            last = m.end();
        }

        out.push_str(&self.content(&text[last..], depth, !skip_stack.is_empty()));
        out
    }

    fn content(&self, content: &str, depth: usize, skipped: bool) -> String {
        if skipped || content.trim().is_empty() {
            return content.to_string();
        }

        let body = content.trim();
        let lead = &content[..content.len() - content.trim_start().len()];
        let trail = &content[content.trim_end().len()..];

        let body = if depth == 0 {
            self.blank_line
                .split(body)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| format!("<p>{}</p>", line_breaks(p)))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            line_breaks(body)
        };

        format!("{lead}{body}{trail}")
    }
}

fn line_breaks(s: &str) -> String {
    s.replace('\n', "<br />\n")
}

//! Rewrite rules of the correction pipeline

use regex::{Captures, Regex};

use crate::correction::protect::PROTECTED_DOT;
use crate::error::Result;
use crate::markup::compile_regex;

/// Block-level elements that sit next to paragraphs
const BLOCK_TAGS: &str = "address|article|aside|blockquote|dd|div|dl|dt|fieldset|figcaption|\
figure|footer|form|h[1-6]|header|hr|li|main|nav|ol|pre|section|table|tbody|td|tfoot|th|thead|tr|ul";

/// How a rule rewrites its matches
#[derive(Debug, Clone)]
enum Rewrite {
    /// Regex replacement template (`$1`, `${2}`)
    Template(String),
    /// Escape ampersands that do not start an entity
    Ampersand,
}

#[derive(Debug, Clone)]
struct Rule {
    name: &'static str,
    regex: Regex,
    rewrite: Rewrite,
    /// Extra passes for rules whose matches can overlap
    passes: usize,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, template: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name,
            regex: compile_regex(pattern)?,
            rewrite: Rewrite::Template(template.into()),
            passes: 1,
        })
    }

    fn twice(mut self) -> Self {
        self.passes = 2;
        self
    }

    fn apply(&self, mut text: String) -> String {
        for _ in 0..self.passes {
            if !self.regex.is_match(&text) {
                break;
            }
            text = match &self.rewrite {
                Rewrite::Template(template) => {
                    self.regex.replace_all(&text, template.as_str()).into_owned()
                }
                Rewrite::Ampersand => self
                    .regex
                    .replace_all(&text, |caps: &Captures<'_>| {
                        if caps.get(1).is_some() {
                            caps[0].to_string()
                        } else {
                            "&amp;".to_string()
                        }
                    })
                    .into_owned(),
            };
        }
        text
    }
}

/// Ordered character-level rules
#[derive(Debug, Clone)]
pub(crate) struct CharRules {
    rules: Vec<Rule>,
}

impl CharRules {
    pub(crate) fn new() -> Result<Self> {
        let dots: String = std::iter::repeat(PROTECTED_DOT).take(3).collect();
        let rules = vec![
            Rule::new("apostrophe", r"(\w)'(\w)", "${1}&rsquo;${2}")?.twice(),
            Rule::new(
                "opening double quote",
                r#"(?m)(^|[\s(\[{>])"(\S)"#,
                "${1}&ldquo;${2}",
            )?,
            Rule::new("closing double quote", r#"""#, "&rdquo;")?,
            Rule::new(
                "opening single quote",
                r"(?m)(^|[\s(\[{>]|&ldquo;)'(\S)",
                "${1}&lsquo;${2}",
            )?,
            Rule::new("closing single quote", r"'", "&rsquo;")?,
            Rule::new("em dash", r"(\s)-{2,3}(\s)", "${1}&mdash;${2}")?,
            Rule::new("repeated spaces", r"([^\s])[ \t]{2,}", "${1} ")?,
            Rule::new("long dot run", r"\.{4,}", dots)?,
            Rule::new("ellipsis", r"(\w)\.\.\.", "${1}&hellip;")?,
            Rule {
                name: "bare ampersand",
                regex: compile_regex(r"&(#[0-9]+;|#[xX][0-9A-Fa-f]+;|[A-Za-z][A-Za-z0-9]*;)?")?,
                rewrite: Rewrite::Ampersand,
                passes: 1,
            },
            Rule::new(
                "space before punctuation",
                r"(?m)[ \t]+([.,;:!?])(\s|$)",
                "${1}${2}",
            )?,
            Rule::new("repeated exclamation", r"!{2,}", "!")?,
            Rule::new("repeated question", r"\?{2,}", "?")?,
        ];
        Ok(Self { rules })
    }

    pub(crate) fn apply(&self, text: String) -> String {
        self.rules.iter().fold(text, |text, rule| {
            let out = rule.apply(text);
            log::trace!("applied rule '{}'", rule.name);
            out
        })
    }
}

/// Paragraph cleanup run on HTML output
#[derive(Debug, Clone)]
pub(crate) struct CleanupRules {
    rules: Vec<Rule>,
    empty_paragraph: Regex,
}

impl CleanupRules {
    pub(crate) fn new() -> Result<Self> {
        let rules = vec![
            Rule::new("duplicate paragraph close", r"</p>(?:\s*</p>)+", "</p>")?,
            Rule::new(
                "empty paragraph before block",
                &format!(r"(?i)<p>\s*</p>\s*(</?(?:{BLOCK_TAGS})\b)"),
                "${1}",
            )?,
            Rule::new(
                "empty paragraph after block",
                &format!(r"(?i)(</?(?:{BLOCK_TAGS})\b[^>]*>)\s*<p>\s*</p>"),
                "${1}",
            )?,
            Rule::new(
                "nbsp before block",
                &format!("(?i)(?:&nbsp;|\u{A0})+(\\s*</?(?:{BLOCK_TAGS})\\b)"),
                "${1}",
            )?,
        ];
        Ok(Self {
            rules,
            empty_paragraph: compile_regex(r"<p>\s*</p>")?,
        })
    }

    pub(crate) fn apply(&self, text: String, remove_empty: bool) -> String {
        let text = self.rules.iter().fold(text, |text, rule| rule.apply(text));
        let filler = if remove_empty { "" } else { "<p>&nbsp;</p>" };
        self.empty_paragraph.replace_all(&text, filler).into_owned()
    }
}

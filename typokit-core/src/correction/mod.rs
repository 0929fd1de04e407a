//! Typographic text correction
//!
//! [`Corrector::correct`] runs a fixed pipeline over plain text or HTML:
//! line endings are normalized, markup and skip-element content are hidden
//! behind placeholders, optional paragraphs are built, the character rules
//! curl quotes and fix dashes, ellipses, spacing and ampersands, and the
//! paragraph markup is tidied. It never fails once constructed.

pub mod options;
mod paragraphs;
mod protect;
mod rules;

pub use options::{CorrectionOptions, CorrectionOptionsBuilder};

use std::collections::HashSet;

use regex::{Captures, Regex};

use crate::error::Result;
use crate::markup::{compile_regex, HTML_PROBE, TAG};
use paragraphs::Paragraphs;
use protect::{comment_regex, protect_matches, restore, CommentStash, Literals, INLINE_OPEN};
use rules::{CharRules, CleanupRules};

/// Compiled correction pipeline
#[derive(Debug, Clone)]
pub struct Corrector {
    options: CorrectionOptions,
    probe: Regex,
    newline_run: Regex,
    comment: Regex,
    tag: Regex,
    braces: Regex,
    skip_elements: Vec<Regex>,
    inline_open: Regex,
    inline_tags: HashSet<String>,
    paragraphs: Paragraphs,
    chars: CharRules,
    cleanup: CleanupRules,
}

impl Corrector {
    pub fn new(options: CorrectionOptions) -> Result<Self> {
        options.validate()?;

        let skip_tags: HashSet<String> = options
            .skip_tags
            .iter()
            .map(|t| t.to_ascii_lowercase())
            .collect();
        let mut sorted_skip: Vec<&String> = skip_tags.iter().collect();
        sorted_skip.sort();
        let skip_elements = sorted_skip
            .iter()
            .map(|name| {
                let name = regex::escape(name);
                compile_regex(&format!(r"(?is)(<{name}\b[^>]*>)(.*?)(</{name}\s*>)"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            probe: compile_regex(HTML_PROBE)?,
            newline_run: compile_regex(r"\n{3,}")?,
            comment: comment_regex()?,
            tag: compile_regex(TAG)?,
            braces: compile_regex(r"\{[^{}]*\}")?,
            skip_elements,
            inline_open: compile_regex(r"<(/?)([A-Za-z][A-Za-z0-9:_]*)")?,
            inline_tags: options
                .inline_tags
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            paragraphs: Paragraphs::new(&skip_tags)?,
            chars: CharRules::new()?,
            cleanup: CleanupRules::new()?,
            options,
        })
    }

    pub fn options(&self) -> &CorrectionOptions {
        &self.options
    }

    /// Whether `text` would be treated as HTML
    pub fn is_html(&self, text: &str) -> bool {
        self.probe.is_match(text)
    }

    pub fn correct(&self, text: &str) -> String {
        self.correct_as(text, self.is_html(text))
    }

    /// Correct `text`, treating it as HTML or not regardless of its content
    pub fn correct_as(&self, text: &str, is_html: bool) -> String {
        let mut literals = Literals::default();
        let mut text = literals.escape(text.replace("\r\n", "\n").replace('\r', "\n"));
        if self.options.collapse_newlines {
            text = self.newline_run.replace_all(&text, "\n\n").into_owned();
        }

        log::trace!("correcting {} bytes (html: {is_html})", text.len());

        let mut comments = CommentStash::default();
        if is_html {
            text = comments.stash(&text, &self.comment);
            for element in &self.skip_elements {
                text = protect_matches(&text, element, Some(2));
            }
            text = protect_matches(&text, &self.tag, None);
            if self.options.protect_braces {
                text = protect_matches(&text, &self.braces, None);
            }
            text = self.mark_inline(&text);
        }

        if self.options.paragraphs {
            text = self.paragraphs.apply(&text);
        }

        let mut text = restore(&self.chars.apply(text));

        if is_html || self.options.paragraphs {
            text = self
                .cleanup
                .apply(text, self.options.remove_empty_paragraphs);
        }
        if !comments.is_empty() {
            text = comments.restore(text);
        }
        literals.unescape(text)
    }

    /// Mask the `<` of inline tags so they stay inside their paragraph
    fn mark_inline(&self, text: &str) -> String {
        self.inline_open
            .replace_all(text, |caps: &Captures<'_>| {
                if self.inline_tags.contains(&caps[2].to_ascii_lowercase()) {
                    format!("{INLINE_OPEN}{}{}", &caps[1], &caps[2])
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> Corrector {
        Corrector::new(CorrectionOptions::default()).unwrap()
    }

    fn with_paragraphs() -> Corrector {
        Corrector::new(CorrectionOptions::builder().paragraphs(true).build().unwrap()).unwrap()
    }

    #[test]
    fn test_invalid_options() {
        let options = CorrectionOptions {
            skip_tags: vec!["bad tag".into()],
            ..Default::default()
        };
        assert!(Corrector::new(options).is_err());
    }

    #[test]
    fn test_forced_markup_handling() {
        let input = r#"<a href="x">y</a>"#;
        assert_eq!(corrector().correct(input), input);
        assert_eq!(corrector().correct_as(input, true), input);
        assert_eq!(
            corrector().correct_as(input, false),
            "<a href=&rdquo;x&rdquo;>y</a>"
        );
    }

    #[test]
    fn test_smart_quotes_plain() {
        assert_eq!(
            corrector().correct(r#"He said "hello" to 'Ann'"#),
            "He said &ldquo;hello&rdquo; to &lsquo;Ann&rsquo;"
        );
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(corrector().correct("Wait...."), "Wait...");
        assert_eq!(corrector().correct("Wait..."), "Wait&hellip;");
    }

    #[test]
    fn test_line_endings_and_blank_lines() {
        assert_eq!(corrector().correct("a\r\nb\rc\n\n\n\nd"), "a\nb\nc\n\nd");
        let keep = Corrector::new(
            CorrectionOptions::builder()
                .collapse_newlines(false)
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(keep.correct("a\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_attributes_are_protected() {
        let out = corrector().correct(r#"<a href="x.html" title='it&apos;s'>"go"</a>"#);
        assert_eq!(
            out,
            r#"<a href="x.html" title='it&apos;s'>&ldquo;go&rdquo;</a>"#
        );
    }

    #[test]
    fn test_skip_elements_are_protected() {
        let input = "<p>\"a\"</p><pre>\"b\"  --  x...</pre><code>it's</code>";
        assert_eq!(
            corrector().correct(input),
            "<p>&ldquo;a&rdquo;</p><pre>\"b\"  --  x...</pre><code>it's</code>"
        );
    }

    #[test]
    fn test_braces_are_protected_in_html() {
        let out = corrector().correct("<p>{\"key\": 'v'} \"q\"</p>");
        assert_eq!(out, "<p>{\"key\": 'v'} &ldquo;q&rdquo;</p>");
    }

    #[test]
    fn test_comments_survive() {
        let out = corrector().correct("<p>\"x\"</p><!-- don't \"touch\" -->");
        assert_eq!(out, "<p>&ldquo;x&rdquo;</p><!-- don't \"touch\" -->");
    }

    #[test]
    fn test_private_use_input_is_kept() {
        let plain = "icon \u{E001} and \u{E005} and \u{E030}x";
        assert_eq!(corrector().correct(plain), plain);

        let html = "<p>\u{E020}0\u{E021}</p><!-- c -->";
        assert_eq!(corrector().correct(html), html);
    }

    #[test]
    fn test_private_use_input_next_to_rules() {
        assert_eq!(
            corrector().correct("\u{E004} \"hi\" -- \u{E008}"),
            "\u{E004} &ldquo;hi&rdquo; &mdash; \u{E008}"
        );
    }

    #[test]
    fn test_paragraphs_are_off_by_default() {
        assert_eq!(corrector().correct("one\n\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_paragraphs_plain_text() {
        assert_eq!(
            with_paragraphs().correct("one\nline\n\ntwo"),
            "<p>one<br />\nline</p>\n<p>two</p>"
        );
    }

    #[test]
    fn test_paragraphs_keep_inline_tags() {
        assert_eq!(
            with_paragraphs().correct("a <em>b</em>\n\n<div>c\nd</div>"),
            "<p>a <em>b</em></p>\n\n<div>c<br />\nd</div>"
        );
    }

    #[test]
    fn test_standalone_comment_is_not_wrapped() {
        assert_eq!(
            with_paragraphs().correct("<!-- note -->\n\ntext"),
            "<!-- note -->\n<p>text</p>"
        );
    }

    #[test]
    fn test_empty_paragraphs_are_removed() {
        assert_eq!(corrector().correct("<p></p><div>x</div>"), "<div>x</div>");
        assert_eq!(corrector().correct("<p>x</p></p>"), "<p>x</p>");
    }

    #[test]
    fn test_malformed_markup_is_total() {
        for input in [
            "<p",
            "<p>\"unclosed",
            "</div></div>",
            "<pre>never closed \"x\"",
            "<<>>",
            "&",
            "<!-- open",
            "{\"",
        ] {
            let _ = corrector().correct(input);
            let _ = with_paragraphs().correct(input);
        }
    }
}

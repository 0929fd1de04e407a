//! Single-word hyphenation
//!
//! Rules are tried in a fixed order and the first one that applies decides
//! the result. Manual markup always beats the dictionary, and the
//! dictionary always beats the patterns.

use crate::hyphenation::options::HyphenationOptions;
use crate::hyphenation::scorer::score_chars;
use crate::language::{Exception, PatternSet};

/// Spellings of a soft hyphen an author may have typed
const SOFT_HYPHENS: &[&str] = &["\u{AD}", "&shy;", "&#173;", "&#xad;", "&#xAD;"];

/// Hyphenate one word with `set`
pub fn hyphenate_word(word: &str, set: &PatternSet, options: &HyphenationOptions) -> String {
    WordHyphenator::new(set, options).hyphenate(word)
}

/// Word hyphenator bound to a pattern set and options
#[derive(Debug, Clone, Copy)]
pub struct WordHyphenator<'a> {
    set: &'a PatternSet,
    options: &'a HyphenationOptions,
    shortest: usize,
    longest: usize,
}

impl<'a> WordHyphenator<'a> {
    pub fn new(set: &'a PatternSet, options: &'a HyphenationOptions) -> Self {
        let (shortest, longest) = options
            .pattern_window
            .unwrap_or((set.shortest_pattern(), set.longest_pattern()));
        Self {
            set,
            options,
            shortest,
            longest,
        }
    }

    pub fn hyphenate(&self, word: &str) -> String {
        let opts = self.options;

        if word.trim().is_empty() {
            return word.to_string();
        }

        if !opts.no_hyphenate_marker.is_empty() && word.starts_with(&opts.no_hyphenate_marker) {
            let rest = &word[opts.no_hyphenate_marker.len()..];
            let rest = if opts.custom_hyphen.is_empty() {
                rest.to_string()
            } else {
                rest.replace(&opts.custom_hyphen, "")
            };
            return self.mark(rest);
        }

        // Already handled on an earlier run
        if opts.mark_customized && word.starts_with(&opts.customized_marker) {
            return word.to_string();
        }

        if word.chars().count() < opts.min_word_length {
            return word.to_string();
        }

        if SOFT_HYPHENS.iter().any(|s| word.contains(s)) {
            return SOFT_HYPHENS
                .iter()
                .fold(word.to_string(), |acc, s| acc.replace(s, &opts.hyphen));
        }

        if !opts.custom_hyphen.is_empty() && word.contains(&opts.custom_hyphen) {
            return self.mark(word.replace(&opts.custom_hyphen, &opts.hyphen));
        }

        if word.contains(&opts.hyphen) {
            return word.to_string();
        }

        if let Some(sep) = opts
            .special_separators
            .iter()
            .find(|sep| word.contains(sep.as_str()))
        {
            return word
                .split(sep.as_str())
                .map(|part| self.hyphenate(part))
                .collect::<Vec<_>>()
                .join(sep);
        }

        if let Some(exception) = self.set.exception(word) {
            return splice(word, exception, &opts.hyphen).unwrap_or_else(|| word.to_string());
        }

        self.hyphenate_core(word)
    }

    fn hyphenate_core(&self, word: &str) -> String {
        let (prefix, core, suffix) = self.split_affixes(word);
        if core.is_empty() || core.chars().any(|c| self.options.is_special(c)) {
            return word.to_string();
        }

        let body = match self.set.exception(core) {
            Some(exception) => splice(core, exception, &self.options.hyphen),
            None => self.hyphenate_by_patterns(core),
        };

        match body {
            Some(body) => format!("{prefix}{body}{suffix}"),
            None => word.to_string(),
        }
    }

    fn hyphenate_by_patterns(&self, core: &str) -> Option<String> {
        let chars: Vec<char> = core.chars().collect();
        let lower: Vec<char> = core.chars().flat_map(char::to_lowercase).collect();
        if lower.len() != chars.len() {
            return None;
        }

        let n = chars.len();
        let scores = score_chars(&lower, self.set, self.shortest, self.longest);
        let breaks: Vec<usize> = (1..n)
            .filter(|&i| self.accepts(i, n, scores[i]))
            .collect();

        Some(insert_at(&chars, &breaks, &self.options.hyphen))
    }

    #[inline]
    fn accepts(&self, gap: usize, len: usize, score: u8) -> bool {
        let opts = self.options;
        score % 2 == 1
            && score <= opts.quality
            && gap >= opts.left_margin
            && gap + opts.right_margin <= len
    }

    /// Split leading and trailing punctuation and entities off `word`
    fn split_affixes<'w>(&self, word: &'w str) -> (&'w str, &'w str, &'w str) {
        let mut start = 0;
        loop {
            let rest = &word[start..];
            if let Some(len) = leading_entity(rest) {
                start += len;
            } else if let Some(c) = rest.chars().next().filter(|&c| self.options.is_special(c)) {
                start += c.len_utf8();
            } else {
                break;
            }
        }

        let mut end = word.len();
        while end > start {
            let rest = &word[start..end];
            if let Some(len) = trailing_entity(rest) {
                end -= len;
            } else if let Some(c) = rest.chars().next_back().filter(|&c| self.options.is_special(c))
            {
                end -= c.len_utf8();
            } else {
                break;
            }
        }

        (&word[..start], &word[start..end], &word[end..])
    }

    fn mark(&self, word: String) -> String {
        if self.options.mark_customized {
            format!("{}{}", self.options.customized_marker, word)
        } else {
            word
        }
    }
}

/// Byte length of an `&name;` entity at the start of `s`
fn leading_entity(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('&')?;
    let end = rest.find(';')?;
    is_entity_name(&rest[..end]).then_some(end + 2)
}

/// Byte length of an `&name;` entity at the end of `s`
fn trailing_entity(s: &str) -> Option<usize> {
    let body = s.strip_suffix(';')?;
    let amp = body.rfind('&')?;
    is_entity_name(&body[amp + 1..]).then_some(s.len() - amp)
}

fn is_entity_name(name: &str) -> bool {
    let name = name.strip_prefix('#').unwrap_or(name);
    !name.is_empty() && name.len() <= 32 && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Insert `hyphen` into `word` at the exception's break offsets
fn splice(word: &str, exception: &Exception, hyphen: &str) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() != exception.len {
        return None;
    }
    Some(insert_at(&chars, &exception.breaks, hyphen))
}

fn insert_at(chars: &[char], breaks: &[usize], hyphen: &str) -> String {
    let mut out = String::with_capacity(chars.len() * 2 + breaks.len() * hyphen.len());
    let mut next = breaks.iter().peekable();
    for (i, &c) in chars.iter().enumerate() {
        while next.peek().is_some_and(|&&b| b == i) {
            out.push_str(hyphen);
            next.next();
        }
        out.push(c);
    }
    out
}

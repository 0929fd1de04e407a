//! Compiled per-language pattern set
//!
//! A [`PatternSet`] is built once from [`LanguageData`] and never mutated
//! afterwards. Pattern keys use `_` as the word-boundary marker.

use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::language::config::LanguageData;

/// Word-boundary marker used in pattern keys
pub const BOUNDARY: char = '_';

/// Levels for one pattern, one per gap (`letters + 1` entries)
pub type Levels = SmallVec<[u8; 12]>;

/// Exception word with its break offsets (in chars)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    pub breaks: Vec<usize>,
    pub len: usize,
}

impl Exception {
    /// Parse a hyphen-marked spelling like `"hy-phen-ation"`
    pub fn parse(spelling: &str) -> Self {
        let mut breaks = Vec::new();
        let mut len = 0usize;

        for ch in spelling.chars() {
            if ch == '-' {
                if len > 0 && breaks.last() != Some(&len) {
                    breaks.push(len);
                }
            } else {
                len += 1;
            }
        }
        // A trailing hyphen is not a break inside the word
        breaks.retain(|&b| b < len);

        Self { breaks, len }
    }
}

/// Compile one TeX-notation pattern (`hy3ph`, `.ex5am`, `2io`)
///
/// Returns the boundary-normalized key and its levels, or `None` when the
/// pattern has no letters.
pub fn compile_tex_pattern(pattern: &str) -> Option<(String, Levels)> {
    let mut key = String::with_capacity(pattern.len());
    let mut levels = Levels::new();
    let mut pending: Option<u8> = None;

    for ch in pattern.trim().chars() {
        if let Some(d) = ch.to_digit(10) {
            pending = Some(d as u8);
        } else {
            levels.push(pending.take().unwrap_or(0));
            let ch = if ch == '.' { BOUNDARY } else { ch };
            key.extend(ch.to_lowercase());
        }
    }
    levels.push(pending.unwrap_or(0));

    if key.is_empty() {
        return None;
    }
    debug_assert_eq!(levels.len(), key.chars().count() + 1);
    Some((key, levels))
}

/// Compiled pattern table plus word lists for one language
#[derive(Debug, Clone)]
pub struct PatternSet {
    code: String,
    name: String,
    patterns: HashMap<String, Levels>,
    exceptions: HashMap<String, Exception>,
    abbreviations: HashSet<String>,
    conjunctions: HashSet<String>,
    prepositions: HashSet<String>,
    shortest: usize,
    longest: usize,
}

impl PatternSet {
    /// Compile raw data; `code` wins over the code recorded in the metadata
    pub fn from_data(code: &str, data: LanguageData) -> Result<Self> {
        let mut patterns: HashMap<String, Levels> = HashMap::new();

        for (raw_key, spec) in &data.patterns {
            let key = normalize_key(raw_key);
            if key.is_empty() {
                return Err(Error::invalid_data(code, "empty pattern key"));
            }
            let levels = parse_levels(code, &key, &spec.digits())?;
            merge_levels(&mut patterns, key, levels);
        }

        for tex in &data.tex_patterns {
            match compile_tex_pattern(tex) {
                Some((key, levels)) => merge_levels(&mut patterns, key, levels),
                None => log::warn!("[{code}] ignoring TeX pattern without letters: {tex:?}"),
            }
        }

        let (shortest, longest) = patterns
            .keys()
            .map(|k| k.chars().count())
            .fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)));
        let shortest = if patterns.is_empty() { 0 } else { shortest };

        let exceptions = data
            .hyphenation
            .iter()
            .map(|(word, spelling)| (word.trim().to_lowercase(), Exception::parse(spelling.trim())))
            .filter(|(word, _)| !word.is_empty())
            .collect();

        let name = if data.metadata.name.is_empty() {
            code.to_string()
        } else {
            data.metadata.name
        };

        Ok(Self {
            code: code.to_string(),
            name,
            patterns,
            exceptions,
            abbreviations: word_set(data.abbreviations),
            conjunctions: word_set(data.conjunctions),
            prepositions: word_set(data.prepositions),
            shortest,
            longest,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Levels for an exact (lower-cased, boundary-normalized) key
    #[inline]
    pub fn pattern(&self, key: &str) -> Option<&[u8]> {
        self.patterns.get(key).map(|l| l.as_slice())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Length in chars of the shortest pattern key (0 when there are none)
    pub fn shortest_pattern(&self) -> usize {
        self.shortest
    }

    /// Length in chars of the longest pattern key
    pub fn longest_pattern(&self) -> usize {
        self.longest
    }

    /// Exception entry for a word, matched case-insensitively
    pub fn exception(&self, word: &str) -> Option<&Exception> {
        if self.exceptions.is_empty() {
            return None;
        }
        self.exceptions.get(&word.to_lowercase())
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    pub fn is_conjunction(&self, word: &str) -> bool {
        self.conjunctions.contains(&word.to_lowercase())
    }

    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(&word.to_lowercase())
    }

    /// Abbreviations match with or without their trailing dot
    pub fn is_abbreviation(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.abbreviations.contains(&lower)
            || self.abbreviations.contains(lower.trim_end_matches('.'))
    }

    /// Whether a non-breaking space should follow `word`
    pub fn binds_to_next(&self, word: &str) -> bool {
        self.is_conjunction(word) || self.is_preposition(word) || self.is_abbreviation(word)
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| if c == '.' { BOUNDARY } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_levels(code: &str, key: &str, digits: &str) -> Result<Levels> {
    let slots = key.chars().count() + 1;
    let count = digits.chars().count();
    if count > slots {
        return Err(Error::invalid_data(
            code,
            format!("pattern '{key}' has {count} levels, expected at most {slots}"),
        ));
    }

    let mut levels = Levels::from_elem(0, slots - count);
    for ch in digits.chars() {
        let d = ch.to_digit(10).ok_or_else(|| {
            Error::invalid_data(code, format!("pattern '{key}' has non-digit level '{ch}'"))
        })?;
        levels.push(d as u8);
    }
    Ok(levels)
}

fn merge_levels(patterns: &mut HashMap<String, Levels>, key: String, levels: Levels) {
    match patterns.get_mut(&key) {
        Some(existing) => {
            for (e, l) in existing.iter_mut().zip(levels.iter()) {
                *e = (*e).max(*l);
            }
        }
        None => {
            patterns.insert(key, levels);
        }
    }
}

fn word_set(words: Vec<String>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_tex_pattern() {
        let (key, levels) = compile_tex_pattern("hy3ph").unwrap();
        assert_eq!(key, "hyph");
        assert_eq!(levels.as_slice(), &[0, 0, 3, 0, 0]);

        let (key, levels) = compile_tex_pattern(".ex5am").unwrap();
        assert_eq!(key, "_exam");
        assert_eq!(levels.as_slice(), &[0, 0, 0, 5, 0, 0]);

        let (key, levels) = compile_tex_pattern("2io").unwrap();
        assert_eq!(key, "io");
        assert_eq!(levels.as_slice(), &[2, 0, 0]);

        assert!(compile_tex_pattern("123").is_none());
    }

    #[test]
    fn test_short_level_strings_are_left_padded() {
        let data = LanguageData::new("xx").with_pattern("hy", "1");
        let set = PatternSet::from_data("xx", data).unwrap();
        assert_eq!(set.pattern("hy"), Some(&[0, 0, 1][..]));
    }

    #[test]
    fn test_numeric_levels_are_accepted() {
        let mut data = LanguageData::new("xx");
        data.patterns
            .insert("abc".into(), crate::language::LevelSpec::Number(210));
        let set = PatternSet::from_data("xx", data).unwrap();
        assert_eq!(set.pattern("abc"), Some(&[0, 2, 1, 0][..]));
    }

    #[test]
    fn test_too_many_levels_is_invalid() {
        let data = LanguageData::new("xx").with_pattern("hy", "0100");
        assert!(matches!(
            PatternSet::from_data("xx", data),
            Err(Error::InvalidData { .. })
        ));
    }

    #[test]
    fn test_non_digit_levels_are_invalid() {
        let data = LanguageData::new("xx").with_pattern("hy", "0a0");
        assert!(matches!(
            PatternSet::from_data("xx", data),
            Err(Error::InvalidData { .. })
        ));
    }

    #[test]
    fn test_keys_are_normalized() {
        let data = LanguageData::new("xx").with_pattern(".HY", "0010");
        let set = PatternSet::from_data("xx", data).unwrap();
        assert!(set.pattern("_hy").is_some());
        assert_eq!(set.shortest_pattern(), 3);
        assert_eq!(set.longest_pattern(), 3);
    }

    #[test]
    fn test_duplicate_keys_merge_by_maximum() {
        let data = LanguageData::new("xx")
            .with_pattern("hyph", "00100")
            .with_tex_patterns(["h2yph", "hyp4h"]);
        let set = PatternSet::from_data("xx", data).unwrap();
        assert_eq!(set.pattern("hyph"), Some(&[0, 2, 1, 4, 0][..]));
    }

    #[test]
    fn test_pattern_bounds() {
        let data = LanguageData::new("xx").with_tex_patterns(["a1b", ".abc1d", "x1y"]);
        let set = PatternSet::from_data("xx", data).unwrap();
        assert_eq!(set.shortest_pattern(), 2);
        assert_eq!(set.longest_pattern(), 5);
        assert_eq!(set.pattern_count(), 3);
    }

    #[test]
    fn test_exception_parse() {
        assert_eq!(
            Exception::parse("hy-phen-ation"),
            Exception {
                breaks: vec![2, 6],
                len: 11
            }
        );
        assert_eq!(Exception::parse("project").breaks, Vec::<usize>::new());
        assert_eq!(Exception::parse("-ab--c-").breaks, vec![2]);
    }

    #[test]
    fn test_exception_lookup_is_case_insensitive() {
        let data = LanguageData::new("xx").with_exception("Table", "ta-ble");
        let set = PatternSet::from_data("xx", data).unwrap();
        assert!(set.exception("TABLE").is_some());
        assert!(set.exception("table").is_some());
        assert!(set.exception("tables").is_none());
    }

    #[test]
    fn test_word_lists() {
        let data = LanguageData::new("cs")
            .with_conjunctions(["a", "i"])
            .with_prepositions(["v", "ve"])
            .with_abbreviations(["např."]);
        let set = PatternSet::from_data("cs", data).unwrap();
        assert!(set.is_conjunction("A"));
        assert!(set.is_preposition("ve"));
        assert!(set.is_abbreviation("Např."));
        assert!(set.is_abbreviation("např"));
        assert!(!set.binds_to_next("dům"));
    }

    #[test]
    fn test_name_defaults_to_code() {
        let set = PatternSet::from_data("xx", LanguageData::default()).unwrap();
        assert_eq!(set.name(), "xx");
        assert_eq!(set.shortest_pattern(), 0);
        assert_eq!(set.longest_pattern(), 0);
    }
}

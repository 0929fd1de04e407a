//! Liang-style hyphenation
//!
//! [`score_positions`] scores the gaps of one word, [`WordHyphenator`] turns
//! scores and manual markup into a hyphenated word, and [`Hyphenator`]
//! applies that to every word of a text while leaving markup alone.

pub mod options;
pub mod scorer;
pub mod word;

pub use options::{quality, HyphenationOptions, HyphenationOptionsBuilder};
pub use scorer::score_positions;
pub use word::{hyphenate_word, WordHyphenator};

use crate::binding;
use crate::error::Result;
use crate::language::PatternSet;
use crate::markup::Tokenizer;

/// Word counts from one hyphenation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Words seen outside markup and skip elements
    pub words: usize,
    /// Words the pass changed
    pub changed: usize,
}

/// Text-level hyphenator with validated options
#[derive(Debug, Clone)]
pub struct Hyphenator {
    options: HyphenationOptions,
    tokenizer: Tokenizer,
}

impl Hyphenator {
    pub fn new(options: HyphenationOptions) -> Result<Self> {
        options.validate()?;
        let tokenizer = Tokenizer::new(&options.skip_tags)?;
        Ok(Self { options, tokenizer })
    }

    pub fn options(&self) -> &HyphenationOptions {
        &self.options
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Hyphenate every word of `text`, detecting HTML on the way
    pub fn hyphenate(&self, text: &str, set: &PatternSet) -> String {
        self.hyphenate_with_stats(text, set).0
    }

    /// Like [`Hyphenator::hyphenate`], also counting the words it changed
    pub fn hyphenate_with_stats(&self, text: &str, set: &PatternSet) -> (String, WordStats) {
        self.hyphenate_as(text, set, self.tokenizer.is_html(text))
    }

    /// Hyphenate with HTML handling forced on or off
    pub fn hyphenate_as(
        &self,
        text: &str,
        set: &PatternSet,
        is_html: bool,
    ) -> (String, WordStats) {
        let words = WordHyphenator::new(set, &self.options);
        let mut stats = WordStats::default();
        let out = self.tokenizer.process(text, is_html, |word| {
            let hyphenated = words.hyphenate(word);
            stats.words += 1;
            if hyphenated != word {
                stats.changed += 1;
            }
            hyphenated
        });

        let out = if self.options.bind_words {
            binding::bind_tokens(&self.tokenizer, &out, is_html, set, &self.options.nbsp)
        } else {
            out
        };
        (out, stats)
    }

    pub fn hyphenate_word(&self, word: &str, set: &PatternSet) -> String {
        WordHyphenator::new(set, &self.options).hyphenate(word)
    }
}

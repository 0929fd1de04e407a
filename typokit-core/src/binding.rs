//! Non-breaking spaces after short words
//!
//! A conjunction, preposition or abbreviation at the end of a line reads
//! badly, so the space after it is replaced with a non-breaking one.

use crate::error::Result;
use crate::hyphenation::HyphenationOptions;
use crate::language::PatternSet;
use crate::markup::{Token, Tokenizer};

/// Bind short words in `text` to the word that follows them
pub fn bind_words(text: &str, set: &PatternSet, options: &HyphenationOptions) -> Result<String> {
    options.validate()?;
    let tokenizer = Tokenizer::new(&options.skip_tags)?;
    let is_html = tokenizer.is_html(text);
    Ok(bind_tokens(&tokenizer, text, is_html, set, &options.nbsp))
}

pub(crate) fn bind_tokens(
    tokenizer: &Tokenizer,
    text: &str,
    is_html: bool,
    set: &PatternSet,
    nbsp: &str,
) -> String {
    let tokens = tokenizer.tokenize(text, is_html);
    let mut out = String::with_capacity(text.len());

    for (i, token) in tokens.iter().enumerate() {
        if let Token::Whitespace(ws) = token {
            let binds = i > 0
                && i + 1 < tokens.len()
                && !ws.contains('\n')
                && matches!(tokens[i - 1], Token::Word(w) if binds_to_next(set, w));
            if binds {
                out.push_str(nbsp);
                continue;
            }
        }
        out.push_str(token.as_str());
    }
    out
}

fn binds_to_next(set: &PatternSet, word: &str) -> bool {
    let word = word.trim_end_matches(',');
    !word.is_empty() && set.binds_to_next(word)
}

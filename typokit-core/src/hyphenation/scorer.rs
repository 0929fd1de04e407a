//! Per-gap Liang scoring

use crate::language::{PatternSet, BOUNDARY};

/// Score every gap of `word` against `set`
///
/// Returns `chars(word) + 1` levels; index `i` is the gap before the `i`-th
/// char. Every window of `shortest..=longest` chars of `_word_` is looked up
/// and hits are overlaid with `max`, so the result does not depend on the
/// order patterns are visited in.
pub fn score_positions(word: &str, set: &PatternSet, shortest: usize, longest: usize) -> Vec<u8> {
    let lower: Vec<char> = word.chars().flat_map(char::to_lowercase).collect();
    score_chars(&lower, set, shortest, longest)
}

pub(crate) fn score_chars(
    lower: &[char],
    set: &PatternSet,
    shortest: usize,
    longest: usize,
) -> Vec<u8> {
    let n = lower.len();
    let shortest = shortest.max(1);

    let mut wrapped = Vec::with_capacity(n + 2);
    wrapped.push(BOUNDARY);
    wrapped.extend_from_slice(lower);
    wrapped.push(BOUNDARY);
    let m = wrapped.len();
    let longest = longest.min(m);

    let mut levels = vec![0u8; m + 1];
    if shortest <= longest {
        let mut key = String::with_capacity(longest * 4);
        for start in 0..m {
            let max_len = longest.min(m - start);
            for len in shortest..=max_len {
                key.clear();
                key.extend(&wrapped[start..start + len]);
                if let Some(found) = set.pattern(&key) {
                    for (offset, &level) in found.iter().enumerate() {
                        let slot = &mut levels[start + offset];
                        *slot = (*slot).max(level);
                    }
                }
            }
        }
    }

    // Wrapped gap g is bare gap g - 1
    levels[1..=n + 1].to_vec()
}

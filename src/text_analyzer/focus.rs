// Optimal recognition point (focus letter) computation.

use crate::error::AnalysisError;

/// Index within a bare run of `len` letters: `3 * (len + 1) / 10`, capped at
/// the last letter.
///
/// | len | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 | 13 | 20 |
/// |-----|---|---|---|---|---|---|---|---|---|----|----|----|
/// | idx | 0 | 0 | 1 | 1 | 1 | 2 | 2 | 2 | 3 | 3  | 4  | 6  |
///
/// Short words sit at or left of center; longer words move right in
/// proportion to their length. Non-decreasing in `len`.
pub fn orp_for_length(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (3 * (len + 1) / 10).min(len - 1)
}

/// Compute `(index, letter)` for a word, in characters (not bytes).
///
/// Leading and trailing non-alphanumeric characters (quotes, brackets,
/// punctuation) are skipped so `"fox."` focuses like `fox`. A token that is
/// nothing but punctuation is measured as a whole.
///
/// Empty input returns [`AnalysisError::InvalidWord`].
pub fn get_focus_letter_index(word: &str) -> Result<(usize, char), AnalysisError> {
    let chars: Vec<char> = word.chars().collect();
    if chars.is_empty() {
        return Err(AnalysisError::InvalidWord);
    }

    let leading = chars.iter().take_while(|c| !c.is_alphanumeric()).count();
    let (offset, core_len) = if leading == chars.len() {
        (0, chars.len())
    } else {
        let trailing = chars.iter().rev().take_while(|c| !c.is_alphanumeric()).count();
        (leading, chars.len() - leading - trailing)
    };

    let index = offset + orp_for_length(core_len);
    Ok((index, chars[index]))
}

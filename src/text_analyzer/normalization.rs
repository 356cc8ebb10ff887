// Whitespace normalization applied before sentence splitting.

/// Collapse every run of whitespace (spaces, tabs, `\r\n`, `\n`) into a single
/// space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_whitespace_into(text, &mut result);
    result
}

/// Normalize into a supplied buffer so callers can reuse one allocation
pub fn normalize_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            // Leading whitespace never produces a separator
            pending_space = !buffer.is_empty();
            continue;
        }

        if pending_space {
            buffer.push(' ');
            pending_space = false;
        }
        buffer.push(ch);
    }
}

/// Number of whitespace-delimited tokens, the word count used everywhere
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

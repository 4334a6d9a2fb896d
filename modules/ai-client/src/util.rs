/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Slice of `s` covering its first `max_tokens` whitespace-delimited tokens.
///
/// Whitespace between the kept tokens is preserved as-is.
pub fn first_tokens(s: &str, max_tokens: usize) -> &str {
    if max_tokens == 0 {
        return "";
    }
    let mut count = 0;
    let mut in_token = false;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            if in_token {
                in_token = false;
                if count == max_tokens {
                    return &s[..i];
                }
            }
        } else if !in_token {
            in_token = true;
            count += 1;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_char_boundary() {
        let text = "Hello 世界";
        let truncated = truncate_to_char_boundary(text, 8);
        assert!(truncated.len() <= 8);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn test_truncate_within_bounds() {
        let text = "Hello";
        assert_eq!(truncate_to_char_boundary(text, 100), "Hello");
    }

    #[test]
    fn first_tokens_cuts_after_nth_word() {
        assert_eq!(first_tokens("one two  three four", 3), "one two  three");
    }

    #[test]
    fn first_tokens_keeps_short_text_whole() {
        assert_eq!(first_tokens("just two", 512), "just two");
        assert_eq!(first_tokens("", 10), "");
    }

    #[test]
    fn first_tokens_handles_multibyte_and_newlines() {
        let text = "# Título\n\nÜber alles\nend";
        assert_eq!(first_tokens(text, 3), "# Título\n\nÜber");
        assert_eq!(first_tokens(text, 0), "");
    }
}

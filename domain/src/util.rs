//! Shared text helpers used when logging prompts and payloads.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of `s` for log output.
///
/// Line breaks become spaces; text longer than `max_bytes` is cut and
/// suffixed with `...`.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.len() <= max_bytes {
        flat
    } else {
        format!("{}...", truncate_str(&flat, max_bytes))
    }
}

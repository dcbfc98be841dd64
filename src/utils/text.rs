//! Small text helpers shared by the renderers
//!
//! All lengths are counted in characters, never bytes, so multi-byte
//! source text is never split inside a code point.

/// Title-case a word list: every letter that follows a non-letter is
/// upper-cased, every other letter lower-cased (`abstract_class` ->
/// `Abstract_Class`).
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// First `n` characters of `s`
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// First `n` characters of `s`, followed by `marker` when `s` was longer
pub fn truncate_with_marker(s: &str, n: usize, marker: &str) -> String {
    let head = take_chars(s, n);
    if head.len() < s.len() {
        format!("{}{}", head, marker)
    } else {
        head.to_string()
    }
}

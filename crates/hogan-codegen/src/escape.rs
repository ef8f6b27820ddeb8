//! JavaScript string-literal escaping for generated code.

/// Escape `s` for use inside a double-quoted JS string literal.
///
/// Backslash, double quote, `\n`, `\r` and the two JS line terminators
/// U+2028/U+2029 are escaped; everything else is copied as is.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

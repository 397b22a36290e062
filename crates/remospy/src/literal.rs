//! Source text for Lua literals.
//!
//! Everything here produces the `raw` text stored on literal nodes. The printer
//! emits that text verbatim, so these helpers are the only place where escaping
//! and delimiter selection happen.

use std::fmt::Write;

/// Reserved words that can never be used as a bare identifier or `name = value` key.
pub const LUA_KEYWORDS: [&str; 22] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in", "local", "nil",
    "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Returns the `raw` source text for a string literal holding `value`.
///
/// Quote selection:
/// - no newline and no `"` → double quotes
/// - no newline and no `'` → single quotes
/// - anything else → long brackets `[==[ ... ]==]` with the smallest safe level
///
/// Inside quotes, backslashes and control characters are escaped so the literal
/// evaluates back to `value`. Long brackets never process escapes, so their
/// content is written untouched.
#[must_use]
pub fn string_raw(value: &str) -> String {
    let multiline = value.contains('\n');
    if !multiline && !value.contains('"') {
        quoted(value, '"')
    } else if !multiline && !value.contains('\'') {
        quoted(value, '\'')
    } else {
        let (open, close) = long_bracket_delimiters(value);
        format!("{open}{value}{close}")
    }
}

/// Wraps `value` in `quote`, escaping backslashes, control characters and any
/// occurrence of the quote character itself.
#[must_use]
pub fn quoted(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            // three digits so a following digit is never absorbed into the escape
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Smallest number of `=` signs that makes a long bracket safe for `value`.
///
/// A level `n` is safe when the closing delimiter `]` + `=`×n + `]` does not occur
/// in the content and the content does not end with `]` + `=`×n (which would fuse
/// with the closing `]`). Levels are probed upwards from zero.
#[must_use]
pub fn long_bracket_level(value: &str) -> usize {
    let mut level = 0;
    loop {
        let equals = "=".repeat(level);
        let closing = format!("]{equals}]");
        let dangling = format!("]{equals}");
        if !value.contains(&closing) && !value.ends_with(&dangling) {
            return level;
        }
        level += 1;
    }
}

/// Opening and closing long-bracket delimiters for `value`.
///
/// The lexer drops a newline that directly follows the opening bracket, so content
/// starting with a newline gets one extra newline in the opening delimiter.
#[must_use]
pub fn long_bracket_delimiters(value: &str) -> (String, String) {
    let equals = "=".repeat(long_bracket_level(value));
    let lead = if value.starts_with('\n') { "\n" } else { "" };
    (format!("[{equals}[{lead}"), format!("]{equals}]"))
}

/// Returns the `raw` source text for a numeric literal.
///
/// Integral values print without a fraction (`42`, not `42.0`), other finite
/// values use the shortest round-tripping form. Non-finite values have no literal
/// syntax and are written as the expressions that produce them.
#[must_use]
#[expect(clippy::cast_possible_truncation, reason = "range is checked against MAX_EXACT_INTEGER")]
pub fn number_raw(value: f64) -> String {
    if value.is_nan() {
        return "0/0".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-math.huge" } else { "math.huge" }.to_owned();
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        return (value as i64).to_string();
    }
    let mut buffer = ryu::Buffer::new();
    buffer.format_finite(value).to_owned()
}

/// Whether `text` can be written as a bare Lua name.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !LUA_KEYWORDS.contains(&text)
}

//! Fuzz target: string literal quoting.
//!
//! Quoted literals must stay on one line, and long-bracket literals must contain the
//! original text verbatim between delimiters of the smallest safe level.

#![no_main]

use libfuzzer_sys::fuzz_target;

use remospy::{long_bracket_delimiters, long_bracket_level, string_raw};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = std::str::from_utf8(data) else {
        return;
    };

    let raw = string_raw(value);
    if raw.starts_with('[') {
        let (open, close) = long_bracket_delimiters(value);
        assert_eq!(raw, format!("{open}{value}{close}"));
        assert!(!value.contains(&close));

        let level = long_bracket_level(value);
        for smaller in 0..level {
            let equals = "=".repeat(smaller);
            assert!(value.contains(&format!("]{equals}]")) || value.ends_with(&format!("]{equals}")));
        }
    } else {
        assert!(!raw.contains('\n'));
        assert!(raw.starts_with('"') || raw.starts_with('\''));
    }
});

//! Locale-aware string ordering
//!
//! User-facing text is ordered the way a browser's default collation orders
//! it, not by code point: `"apple" < "Banana" < "cherry"` and `"e" < "é" < "f"`.
//! The comparison runs in levels, each consulted only when the previous one
//! ties:
//!
//! 1. base characters, ignoring case and accents; punctuation and symbols
//!    sort before digits, digits before letters
//! 2. accents (unaccented first)
//! 3. case (lowercase first)
//! 4. code points, so only identical strings compare equal

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two strings for display ordering.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
        .collect()
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

// 0 for anything already lowercase, 1 for cased uppercase letters.
fn tertiary_key(s: &str) -> Vec<u8> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| u8::from(c.is_uppercase()))
        .collect()
}

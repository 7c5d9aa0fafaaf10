//! Base-strength string collation.
//!
//! Case and diacritics carry no weight: "é" compares as "e" and "A" as "a".
//! A handful of letters that do not decompose under NFD are expanded
//! explicitly (`ß` → `ss`, `æ` → `ae`, ...).
//!
//! Primary order: whitespace, ASCII punctuation, digits, letters.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// Code point order of the ASCII punctuation block.
const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const WHITESPACE_WEIGHT: char = '\u{1}';
const FIRST_PUNCTUATION_WEIGHT: u8 = 0x02;

/// Builds the comparison key for `value`.
///
/// The key is only meaningful for comparison; punctuation and whitespace
/// are replaced by low control characters.
pub fn collation_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    for ch in value.nfd().filter(|ch| !is_combining_mark(*ch)) {
        if ch.is_whitespace() {
            key.push(WHITESPACE_WEIGHT);
            continue;
        }
        if let Some(weight) = punctuation_weight(ch) {
            key.push(weight);
            continue;
        }
        for lower in ch.to_lowercase() {
            match expand_letter(lower) {
                Some(expanded) => key.push_str(expanded),
                None => key.push(lower),
            }
        }
    }
    key
}

/// Compares two strings at base strength.
pub fn collate(left: &str, right: &str) -> Ordering {
    collation_key(left).cmp(&collation_key(right))
}

// Ranks below '0' while keeping code point order within the block.
fn punctuation_weight(ch: char) -> Option<char> {
    let rank = ASCII_PUNCTUATION.find(ch)?;
    u8::try_from(rank)
        .ok()
        .map(|rank| char::from(FIRST_PUNCTUATION_WEIGHT + rank))
}

fn expand_letter(ch: char) -> Option<&'static str> {
    match ch {
        'ß' => Some("ss"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ø' => Some("o"),
        'ł' => Some("l"),
        'đ' => Some("d"),
        'ĳ' => Some("ij"),
        _ => None,
    }
}

//! Counter Module
//!
//! Integer coercion shared by the LRU cache and named maps for `increment`.
//!
//! Values are stored as strings. Parsing is lenient: optional leading
//! whitespace, an optional sign, then as many decimal digits as are present.
//! Anything that does not start like a number reads as 0, and out of range
//! magnitudes saturate at the `i64` bounds.

// == Parse Integer ==
/// Parses the leading integer of a string, returning 0 when there is none.
pub fn parse_integer(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            let digit = i64::from(b - b'0');
            if negative {
                acc.saturating_mul(10).saturating_sub(digit)
            } else {
                acc.saturating_mul(10).saturating_add(digit)
            }
        })
}

// == Add ==
/// Adds a delta to a stored value, both coerced with [`parse_integer`],
/// and renders the sum as a decimal string.
pub fn add(stored: &str, delta: &str) -> String {
    parse_integer(stored)
        .saturating_add(parse_integer(delta))
        .to_string()
}

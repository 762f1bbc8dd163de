//! Phone and email normalization
//!
//! Every intake path, lookup, and test goes through this one module so a
//! number is stored exactly one way: 10 ASCII digits, no punctuation, no
//! country code. Display formatting is derived on the way out and never
//! stored.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Structural check only: something@something.tld
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Reduce free-form phone input to the canonical storage form.
///
/// Strips every non-digit character; an 11-digit result with a leading US
/// country code drops the leading 1. Malformed input simply normalizes to
/// whatever digits remain; this never fails.
pub fn normalize_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 11 && digits.starts_with('1') {
        digits[1..].to_string()
    } else {
        digits
    }
}

/// A phone number is valid when its normalized form is exactly 10 digits.
///
/// Validating the normalized form means "+1 216 481 8696" and
/// "216-481-8696" are both accepted, while an 11-digit number without the
/// US country code is not.
pub fn is_valid_phone(input: &str) -> bool {
    normalize_phone(input).len() == 10
}

/// Render a canonical number as "(216) 481-8696" for dashboards and
/// notification messages. Input that does not normalize to 10 digits is
/// returned unchanged.
pub fn format_phone_display(input: &str) -> String {
    let digits = normalize_phone(input);
    if digits.len() != 10 {
        return input.to_string();
    }
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

/// Progressive "216-481-8696" formatting for live form feedback.
///
/// Partial input stays partial: 1-3 digits pass through, longer input gains
/// dashes as groups complete. Anything beyond 10 digits is cut off.
pub fn format_phone_input(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(10)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}-{}", &digits[0..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..]),
    }
}

/// Lowercase and trim an email address; blank input becomes None.
pub fn normalize_email(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Structural email check used for form feedback; the intake handler never
/// rejects a submission over it.
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input.trim())
}

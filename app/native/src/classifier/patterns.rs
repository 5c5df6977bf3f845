//! Compiled content patterns.
//!
//! The single-line rules live in one ordered table so the decision ladder and
//! the pattern data stay independently testable. All patterns compile once.

use std::sync::LazyLock;

use regex::Regex;

use crate::entity::EntityKind;

/// Email addresses.
pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

/// Phone numbers: parenthesized area code, separator-delimited 3-3-4, or an
/// explicit international `+` form. Bare digit runs (ZIP codes, years) do not
/// match.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\+?1[-.\s])?(\(\d{3}\)[-.\s]?\d{3}[-.\s]?\d{4}|\d{3}[-.\s]\d{3}[-.\s]\d{4}|\+\d{1,4}([-.\s]?\d{1,4}){2,4})\b",
    )
    .expect("phone pattern")
});

/// Websites: full URLs, `www.` hosts, or bare domains.
pub static WEBSITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https?://\S+|www\.\S+|[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]?\.[a-zA-Z]{2,})")
        .expect("website pattern")
});

/// UK postcodes (`SW1A 1AA`).
pub static UK_POSTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{1,2}\d{1,2}[A-Z]?\s?\d[A-Z]{2}\b").expect("postcode"));

/// US ZIP codes (`12345` or `12345-6789`).
pub static US_ZIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}(-\d{4})?\b").expect("zip"));

/// Single-line classification rules in priority order.
#[must_use]
pub fn single_line_rules() -> [(EntityKind, &'static Regex); 3] {
    [
        (EntityKind::Email, &*EMAIL),
        (EntityKind::Phone, &*PHONE),
        (EntityKind::Website, &*WEBSITE),
    ]
}

/// Collects every match of `pattern` in `text`, in document order.
#[must_use]
pub fn all_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Whether `line` matches any of the three content patterns.
#[must_use]
pub fn matches_any_pattern(line: &str) -> bool {
    EMAIL.is_match(line) || PHONE.is_match(line) || WEBSITE.is_match(line)
}

//! Email syntax validation.

use std::sync::LazyLock;

use regex::Regex;

/// Anchored syntactic pattern: local part, `@`, dotted domain, TLD of two or
/// more letters. No normalization is applied before matching.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Check whether `email` is a syntactically well-formed address.
///
/// Syntax only; no MX or DNS lookups.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

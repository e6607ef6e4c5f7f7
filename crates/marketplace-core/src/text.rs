// crates/marketplace-core/src/text.rs

/// Lowercase a string for case-insensitive comparison.
///
/// Uses full Unicode lowercasing (`"MÜNCHEN"` -> `"münchen"`); accents are
/// kept, so `"Zürich"` does not match `"zurich"`.
#[inline]
pub fn fold_lower(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive substring test.
///
/// An empty `needle` is contained in every haystack.
///
/// # Examples
///
/// ```rust
/// use marketplace_core::text::contains_folded;
///
/// assert!(contains_folded("Paris", "par"));
/// assert!(contains_folded("Saint-Étienne", "ÉTIENNE"));
/// assert!(!contains_folded("Lyon", "paris"));
/// ```
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_lower(haystack).contains(&fold_lower(needle))
}

/// Parses a user-typed radius (kilometers).
///
/// - Trims whitespace before parsing.
/// - Empty, non-numeric, non-finite, zero or negative input yields `None`,
///   which callers treat as "no radius filter".
///
/// # Examples
///
/// ```rust
/// use marketplace_core::text::parse_radius;
///
/// assert_eq!(parse_radius(" 25 "), Some(25.0));
/// assert_eq!(parse_radius(""), None);
/// assert_eq!(parse_radius("far"), None);
/// assert_eq!(parse_radius("0"), None);
/// ```
pub fn parse_radius(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite() && *r > 0.0)
}

/// Returns the first `max_chars` characters of `s`, never splitting a
/// multi-byte character.
pub fn excerpt(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

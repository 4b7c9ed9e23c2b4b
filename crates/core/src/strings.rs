//! String helpers: blank checks, diacritic stripping, word counting and
//! truncation.
//!
//! Lengths are counted in `char`s, never bytes.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::types::or_default;

/// ASCII letters, digits, underscore and whitespace; at least one character.
pub const ALPHANUMERIC_PATTERN: &str = r"^[A-Za-z0-9_\s]+$";

/// Appended by [`truncate`].
pub const DEFAULT_ELLIPSIS: &str = "...";

static ALPHANUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ALPHANUMERIC_PATTERN).expect("valid regex"));

/// Combining Diacritical Marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// True for `None`, `""` and whitespace-only strings.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

pub fn is_not_blank(value: Option<&str>) -> bool {
    !is_blank(value)
}

/// Letters, digits, underscore and whitespace only. Accented letters do not
/// qualify.
pub fn is_alphanumeric(value: &str) -> bool {
    ALPHANUMERIC_RE.is_match(value)
}

/// Strip accents, umlauts and other combining marks.
///
/// The string is decomposed (NFD) and every code point in U+0300..=U+036F is
/// dropped, so `"Ça va très bien"` becomes `"Ca va tres bien"`.
pub fn remove_diacritical_marks(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect()
}

/// Uppercase the first character; the rest is untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Number of whitespace-separated words; `0` for blank or missing text.
pub fn count_words(text: Option<&str>) -> usize {
    or_default(text, |t| t.split_whitespace().count())
}

/// [`truncate_with_ellipsis`] with [`DEFAULT_ELLIPSIS`].
///
/// ```
/// use toolbelt_core::strings::truncate;
///
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello", 10), "hello");
/// ```
pub fn truncate(value: &str, max_length: usize) -> String {
    truncate_with_ellipsis(value, max_length, DEFAULT_ELLIPSIS)
}

/// Shorten `value` to at most `max_length` characters, ellipsis included.
///
/// When `max_length` is smaller than the ellipsis itself only the ellipsis
/// is returned, which is then longer than `max_length`.
pub fn truncate_with_ellipsis(value: &str, max_length: usize, ellipsis: &str) -> String {
    if value.chars().count() <= max_length {
        return value.to_string();
    }
    let keep = max_length.saturating_sub(ellipsis.chars().count());
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ellipsis);
    out
}

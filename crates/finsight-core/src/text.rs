//! Text normalization: tokenizer and merchant canonicalization
//!
//! Both functions are pure and infallible. The tokenizer feeds the keyword
//! classifier; the normalizer produces the stable key merchant insights
//! group on.

use regex::Regex;
use std::sync::OnceLock;

/// Placeholder key for merchants that normalize to nothing.
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Business-entity suffixes removed when they appear as standalone words.
const SUFFIX_PATTERN: &str = r"\b(ltd|inc|llc|plc|limited|corp|co)\b";

fn suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SUFFIX_PATTERN).expect("suffix pattern is a valid literal"))
}

/// Split free text into lowercase alphanumeric tokens of length >= 2.
///
/// Splitting happens on non-alphanumeric boundaries. The returned iterator
/// is lazy and the function can be called again to restart. Empty input
/// yields an empty sequence.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_lowercase())
}

/// Canonicalize a raw merchant or description string into a stable key.
///
/// Lowercases, drops standalone business suffixes (ltd, inc, ...), strips
/// everything that is not a letter, digit, or space, and collapses
/// whitespace. An empty result becomes the `"Unknown"` placeholder.
/// Idempotent: normalizing an already-normalized key is a no-op.
pub fn normalize_merchant(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_MERCHANT.to_string();
    };

    // The placeholder is itself a canonical key; lowercasing it again
    // would break idempotency.
    if raw == UNKNOWN_MERCHANT {
        return UNKNOWN_MERCHANT.to_string();
    }

    let lowered = raw.to_lowercase();
    let desuffixed = suffix_regex().replace_all(&lowered, " ");

    let cleaned: String = desuffixed
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        UNKNOWN_MERCHANT.to_string()
    } else {
        collapsed
    }
}

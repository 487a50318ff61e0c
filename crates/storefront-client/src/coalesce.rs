//! First-present-value lookup across differently spelled payload fields.
//!
//! Raw payloads are untyped [`serde_json::Value`]s. Every field read in the
//! normalizers goes through these helpers; candidate order is priority order
//! (the usual camelCase spelling first, PascalCase next, nested or alternate
//! names last).

use serde_json::Value;

/// Returns the first candidate that is present.
///
/// The generic form of the lookup: callers map "missing" and JSON `null` to
/// `None` before handing candidates in.
pub fn coalesce<T, I>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    candidates.into_iter().flatten().next()
}

/// Looks up `key` in `raw`, treating JSON `null` as absent.
///
/// A dotted key (`"category.name"`) walks nested objects.
#[must_use]
pub fn lookup<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(raw, |node, segment| node.get(segment))
        .filter(|v| !v.is_null())
}

/// Returns the first non-null value among `keys`, in order.
#[must_use]
pub fn field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    coalesce(keys.iter().map(|key| lookup(raw, key)))
}

/// Like [`field`] for a single logical name, trying its camelCase,
/// PascalCase, and snake_case spellings in that order.
#[must_use]
pub fn field_any_case<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    coalesce(spellings(key).iter().map(|k| lookup(raw, k)))
}

/// Candidate spellings of a camelCase key: itself, PascalCase, snake_case.
fn spellings(key: &str) -> Vec<String> {
    let mut chars = key.chars();
    let pascal = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect::<String>())
        .unwrap_or_default();

    let mut snake = String::with_capacity(key.len() + 4);
    for (idx, ch) in key.char_indices() {
        if ch.is_uppercase() && idx > 0 {
            snake.push('_');
        }
        if ch.is_ascii_digit() && idx > 0 && !key[..idx].ends_with(|c: char| c.is_ascii_digit()) {
            snake.push('_');
        }
        snake.extend(ch.to_lowercase());
    }

    let mut out = vec![key.to_string()];
    for candidate in [pascal, snake] {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

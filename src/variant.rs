//! Variant key derivation.
//!
//! Maps a class name to its grouping prefix: the shortest non-empty prefix
//! before a run of one or more hyphens, or the whole name when no such run
//! exists. Total and never fails.

use std::sync::LazyLock;

use regex::Regex;

/// `^(.+?)-+` — shortest non-empty prefix before a hyphen run.
static VARIANT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)-+").expect("variant pattern is valid"));

/// Derive the variant grouping key for a class name.
///
/// `btn-primary` → `btn`, `flex` → `flex`, `col-span-2` → `col`, `""` → `""`.
pub fn variant_key(class_name: &str) -> &str {
    match VARIANT_PATTERN.captures(class_name) {
        Some(caps) => caps.get(1).map_or(class_name, |m| m.as_str()),
        None => class_name,
    }
}

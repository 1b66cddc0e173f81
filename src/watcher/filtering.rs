//! File filtering logic for watcher operations
//!
//! Determines which paths count as style sources, by extension and by
//! ignore patterns. Partials (`_variables.scss`) are deliberately included:
//! a partial is a watchable style file like any other.

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

/// Build the set of style-source extensions
pub fn build_style_extensions() -> HashSet<String> {
    // grass compiles both the brace syntax and the indented syntax
    ["scss", "sass"].iter().map(|s| s.to_string()).collect()
}

/// Build ignore patterns for files/directories to skip
pub fn build_ignore_patterns() -> Result<Vec<glob::Pattern>> {
    let patterns = [
        "**/node_modules/**",
        "**/target/**",
        "**/build/**",
        "**/dist/**",
        "**/.git/**",
        "**/.sass-cache/**",
        "**/coverage/**",
        "**/vendor/**",
        "**/node_modules.nosync/**",
    ];

    patterns
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| anyhow::anyhow!("Invalid glob pattern {}: {}", p, e))
        })
        .collect()
}

/// Pure path check: style extension and not ignored. Does not touch the
/// file system, so it also applies to already-deleted paths.
pub fn matches_style_filters(
    path: &Path,
    style_extensions: &HashSet<String>,
    ignore_patterns: &[glob::Pattern],
) -> bool {
    // Check extension
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        if !style_extensions.contains(ext) {
            return false;
        }
    } else {
        return false; // No extension
    }

    // Check ignore patterns
    let path_str = path.to_string_lossy();
    for pattern in ignore_patterns {
        if pattern.matches(&path_str) {
            return false;
        }
    }

    true
}

/// Filter for create/modify events and discovery: the path must also be a
/// live regular file.
pub fn is_watchable_style_file(
    path: &Path,
    style_extensions: &HashSet<String>,
    ignore_patterns: &[glob::Pattern],
) -> bool {
    path.is_file() && matches_style_filters(path, style_extensions, ignore_patterns)
}

// Incremental class cache
//
// Owns three structures: per-file class sets, the global class set, and the
// variant-keyed completion groups. All mutation goes through `update` and
// `remove`; both are fail-free and in-memory only.
//
// Reference counting: a class name may be contributed by several files, so
// membership in the global set and the variant groups is tied to a per-class
// file count, not to any single file's lifetime. `remove` is literally
// `update` with an empty set, which keeps the two eviction paths identical.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::variant::variant_key;

/// Kind marker carried by every completion candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Class,
}

/// An immutable (label, kind) pair offered to the host's suggestion UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub label: String,
    pub kind: CandidateKind,
}

impl CompletionCandidate {
    pub fn class(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: CandidateKind::Class,
        }
    }
}

/// Snapshot of cache size for logging and the CLI surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheStats {
    pub files: usize,
    pub classes: usize,
    pub variant_groups: usize,
}

/// In-memory index of class names across all live style files.
#[derive(Debug, Default)]
pub struct ClassCache {
    /// File identity -> classes currently extracted from that file.
    /// Keyed by path equality, never by object identity.
    file_classes: HashMap<PathBuf, HashSet<String>>,
    /// Class name -> number of live files contributing it.
    class_refs: HashMap<String, usize>,
    /// Union of all live per-file sets. Never holds the empty string.
    global_classes: HashSet<String>,
    /// Variant key -> candidates, unique by label within each group.
    /// A key exists iff at least one live class maps to it.
    variant_groups: HashMap<String, Vec<CompletionCandidate>>,
}

impl ClassCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a file's freshly extracted class set against its previous state.
    ///
    /// Classes that departed release one reference (leaving the global set
    /// and their variant group at zero); classes that arrived gain one
    /// (entering both at one). The stored set is replaced wholesale, so a
    /// full-workspace rescan converges regardless of file order.
    pub fn update(&mut self, path: &Path, mut new_classes: HashSet<String>) {
        new_classes.remove("");

        let old_classes = self.file_classes.remove(path).unwrap_or_default();

        for departed in old_classes.difference(&new_classes) {
            self.release_class(departed);
        }
        for arrived in new_classes.difference(&old_classes) {
            self.retain_class(arrived);
        }

        debug!(
            "Cache update for {}: {} -> {} classes",
            path.display(),
            old_classes.len(),
            new_classes.len()
        );
        self.file_classes.insert(path.to_path_buf(), new_classes);
    }

    /// Drop a removed file's contribution.
    ///
    /// Routed through the same reference-counting path as `update`'s
    /// eviction branch: a class still contributed by another live file
    /// stays in the global set and keeps its candidate.
    pub fn remove(&mut self, path: &Path) {
        self.update(path, HashSet::new());
        self.file_classes.remove(path);
    }

    /// Flatten every variant group into one candidate list.
    pub fn candidates(&self) -> Vec<CompletionCandidate> {
        self.variant_groups.values().flatten().cloned().collect()
    }

    /// The candidates grouped under one variant key, if the key is live.
    pub fn variant_group(&self, key: &str) -> Option<&[CompletionCandidate]> {
        self.variant_groups.get(key).map(Vec::as_slice)
    }

    pub fn variant_keys(&self) -> impl Iterator<Item = &str> {
        self.variant_groups.keys().map(String::as_str)
    }

    /// Variant key -> candidate list, for the CLI's JSON dump.
    pub fn variant_map(&self) -> &HashMap<String, Vec<CompletionCandidate>> {
        &self.variant_groups
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.global_classes.contains(name)
    }

    pub fn global_classes(&self) -> &HashSet<String> {
        &self.global_classes
    }

    /// The recorded class set for a file; `None` if the file was never
    /// cached. Lookup misses are not errors.
    pub fn file_classes(&self, path: &Path) -> Option<&HashSet<String>> {
        self.file_classes.get(path)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            files: self.file_classes.len(),
            classes: self.global_classes.len(),
            variant_groups: self.variant_groups.len(),
        }
    }

    /// Teardown: drop all three structures. Nothing is persisted.
    pub fn clear(&mut self) {
        self.file_classes.clear();
        self.class_refs.clear();
        self.global_classes.clear();
        self.variant_groups.clear();
    }

    fn release_class(&mut self, class: &str) {
        let Some(count) = self.class_refs.get_mut(class) else {
            return;
        };
        *count -= 1;
        if *count > 0 {
            return;
        }

        self.class_refs.remove(class);
        self.global_classes.remove(class);

        // Decrement unconditionally: remove exactly the matching candidate,
        // delete the group only once it is empty.
        let key = variant_key(class);
        let emptied = match self.variant_groups.get_mut(key) {
            Some(group) => {
                group.retain(|candidate| candidate.label != class);
                group.is_empty()
            }
            None => false,
        };
        if emptied {
            self.variant_groups.remove(key);
        }
    }

    fn retain_class(&mut self, class: &str) {
        let count = self.class_refs.entry(class.to_string()).or_insert(0);
        *count += 1;
        if *count > 1 {
            return;
        }

        self.global_classes.insert(class.to_string());
        let group = self
            .variant_groups
            .entry(variant_key(class).to_string())
            .or_default();
        if !group.iter().any(|candidate| candidate.label == class) {
            group.push(CompletionCandidate::class(class));
        }
    }
}

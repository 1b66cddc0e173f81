// Class Cache Tests
//
// Covers the incremental update/remove algorithms: reference counting across
// files, variant group retirement, idempotence, and order independence.

use crate::cache::{ClassCache, CompletionCandidate};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

fn classes(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn labels(candidates: &[CompletionCandidate]) -> HashSet<String> {
    candidates.iter().map(|c| c.label.clone()).collect()
}

/// Variant key -> label set, for whole-map comparisons.
fn variant_snapshot(cache: &ClassCache) -> HashMap<String, HashSet<String>> {
    cache
        .variant_map()
        .iter()
        .map(|(key, group)| (key.clone(), labels(group)))
        .collect()
}

#[test]
fn test_update_registers_classes_and_variant_groups() {
    let mut cache = ClassCache::new();
    cache.update(
        Path::new("styles/buttons.scss"),
        classes(&["btn-primary", "btn-ghost", "flex"]),
    );

    assert!(cache.contains_class("btn-primary"));
    assert!(cache.contains_class("btn-ghost"));
    assert!(cache.contains_class("flex"));

    let btn_group = cache.variant_group("btn").expect("btn group should exist");
    assert_eq!(labels(btn_group), classes(&["btn-primary", "btn-ghost"]));

    // A name without a hyphen run groups under itself.
    let flex_group = cache.variant_group("flex").expect("flex group should exist");
    assert_eq!(labels(flex_group), classes(&["flex"]));
}

#[test]
fn test_update_evicts_departed_classes() {
    let mut cache = ClassCache::new();
    let file = Path::new("styles/buttons.scss");

    cache.update(file, classes(&["btn-primary", "btn-ghost"]));
    cache.update(file, classes(&["btn-ghost"]));

    assert!(!cache.contains_class("btn-primary"));
    assert!(cache.contains_class("btn-ghost"));
    let btn_group = cache.variant_group("btn").expect("btn group should remain");
    assert_eq!(labels(btn_group), classes(&["btn-ghost"]));
}

#[test]
fn test_group_with_one_remaining_candidate_is_retained() {
    // Eviction decrements unconditionally: a group shrunk to one candidate
    // stays live, and only an emptied group is deleted.
    let mut cache = ClassCache::new();
    let file = Path::new("styles/cards.scss");

    cache.update(file, classes(&["card-body", "card-header"]));
    cache.update(file, classes(&["card-body"]));

    let card_group = cache.variant_group("card").expect("card group should remain");
    assert_eq!(labels(card_group), classes(&["card-body"]));

    cache.update(file, classes(&[]));
    assert!(cache.variant_group("card").is_none());
}

#[test]
fn test_removing_last_class_deletes_its_variant_key() {
    let mut cache = ClassCache::new();
    let file = Path::new("styles/alerts.scss");

    cache.update(file, classes(&["alert-info"]));
    assert!(cache.variant_group("alert").is_some());

    cache.remove(file);
    assert!(cache.variant_group("alert").is_none());
    assert!(!cache.contains_class("alert-info"));
    assert!(cache.global_classes().is_empty());
}

#[test]
fn test_remove_respects_classes_shared_with_other_files() {
    let mut cache = ClassCache::new();
    let theme = Path::new("styles/theme.scss");
    let buttons = Path::new("styles/buttons.scss");

    cache.update(theme, classes(&["btn-primary"]));
    cache.update(buttons, classes(&["btn-primary", "btn-ghost"]));

    cache.remove(theme);

    // buttons.scss still contributes btn-primary, so it must survive.
    assert!(cache.contains_class("btn-primary"));
    let btn_group = cache.variant_group("btn").expect("btn group should survive");
    assert_eq!(labels(btn_group), classes(&["btn-primary", "btn-ghost"]));

    cache.remove(buttons);
    assert!(!cache.contains_class("btn-primary"));
    assert!(cache.variant_group("btn").is_none());
}

#[test]
fn test_remove_drops_the_file_entry() {
    let mut cache = ClassCache::new();
    let file = Path::new("styles/gone.scss");

    cache.update(file, classes(&["gone-soon"]));
    assert!(cache.file_classes(file).is_some());

    cache.remove(file);
    assert!(cache.file_classes(file).is_none());
    assert_eq!(cache.stats().files, 0);
}

#[test]
fn test_update_is_idempotent() {
    let mut cache = ClassCache::new();
    let file = Path::new("styles/grid.scss");
    let set = classes(&["col-span-2", "col-span-4", "grid"]);

    cache.update(file, set.clone());
    let first_snapshot = variant_snapshot(&cache);
    let first_globals = cache.global_classes().clone();
    let first_candidates = cache.candidates().len();

    cache.update(file, set);
    assert_eq!(variant_snapshot(&cache), first_snapshot);
    assert_eq!(cache.global_classes(), &first_globals);
    assert_eq!(cache.candidates().len(), first_candidates);
}

#[test]
fn test_rescan_order_independence() {
    let files: Vec<(PathBuf, HashSet<String>)> = vec![
        (
            PathBuf::from("styles/a.scss"),
            classes(&["btn-primary", "flex"]),
        ),
        (
            PathBuf::from("styles/b.scss"),
            classes(&["btn-ghost", "btn-primary"]),
        ),
        (
            PathBuf::from("styles/c.scss"),
            classes(&["card-body", "flex"]),
        ),
    ];

    let mut forward = ClassCache::new();
    for (path, set) in &files {
        forward.update(path, set.clone());
    }

    let mut backward = ClassCache::new();
    for (path, set) in files.iter().rev() {
        backward.update(path, set.clone());
    }

    assert_eq!(forward.global_classes(), backward.global_classes());
    assert_eq!(variant_snapshot(&forward), variant_snapshot(&backward));
}

#[test]
fn test_empty_string_is_never_registered() {
    let mut cache = ClassCache::new();
    let file = Path::new("styles/odd.scss");

    cache.update(file, classes(&["", "btn-x"]));

    assert!(!cache.contains_class(""));
    assert_eq!(cache.stats().classes, 1);
    assert_eq!(
        cache.file_classes(file).expect("file should be cached"),
        &classes(&["btn-x"])
    );
    assert!(cache.variant_group("").is_none());
}

#[test]
fn test_shared_class_yields_one_candidate_per_label() {
    let mut cache = ClassCache::new();
    cache.update(Path::new("a.scss"), classes(&["text-sm"]));
    cache.update(Path::new("b.scss"), classes(&["text-sm", "text-lg"]));

    let text_group = cache.variant_group("text").expect("text group should exist");
    assert_eq!(text_group.len(), 2);
    assert_eq!(labels(text_group), classes(&["text-sm", "text-lg"]));
}

#[test]
fn test_candidates_flattens_all_groups() {
    let mut cache = ClassCache::new();
    cache.update(
        Path::new("styles/all.scss"),
        classes(&["btn-primary", "card-body", "flex"]),
    );

    let all = cache.candidates();
    assert_eq!(all.len(), 3);
    assert_eq!(
        labels(&all),
        classes(&["btn-primary", "card-body", "flex"])
    );
}

#[test]
fn test_clear_drops_everything() {
    let mut cache = ClassCache::new();
    cache.update(Path::new("styles/x.scss"), classes(&["btn-primary"]));

    cache.clear();

    let stats = cache.stats();
    assert_eq!(stats.files, 0);
    assert_eq!(stats.classes, 0);
    assert_eq!(stats.variant_groups, 0);
    assert!(cache.candidates().is_empty());
}

//! End-to-end scenarios: scan both trees, derive the change map the way a
//! file comparer would, sync, and check production converges on staging.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use stl_core::{
    ChangeList, ChangeType, FileChanges, MemoryCache, StaticChanges, SyncConfig, Synchronizer,
};
use stl_fs::{FileRecord, scan};
use stl_test_utils::site::TestSite;

fn by_path(records: Vec<FileRecord>) -> BTreeMap<String, String> {
    records
        .into_iter()
        .map(|record| (record.relative_path.as_str().to_string(), record.content_hash))
        .collect()
}

/// Production inventory without the nested staging tree.
fn production_inventory(site: &TestSite) -> BTreeMap<String, String> {
    let mut inventory = by_path(scan(site.production_root()).unwrap());
    inventory.retain(|path, _| !path.starts_with("staging/"));
    inventory
}

fn diff(staging: &BTreeMap<String, String>, production: &BTreeMap<String, String>) -> FileChanges {
    let mut changes = FileChanges::new();
    for (path, hash) in staging {
        match production.get(path) {
            None => {
                changes.insert(path.clone(), ChangeType::Added);
            }
            Some(live) if live != hash => {
                changes.insert(path.clone(), ChangeType::Modified);
            }
            Some(_) => {}
        }
    }
    for path in production.keys() {
        if !staging.contains_key(path) {
            changes.insert(path.clone(), ChangeType::Deleted);
        }
    }
    changes
}

fn seed(site: &TestSite) {
    site.write_production("index.php", "<?php // same");
    site.write_staging("index.php", "<?php // same");

    site.write_production("wp-content/themes/t/style.css", "body{color:red}");
    site.write_staging("wp-content/themes/t/style.css", "body{color:blue}");

    site.write_staging("wp-content/uploads/2024/01/logo.png", "PNG");
    site.write_production("wp-content/plugins/old/old.php", "<?php // gone");

    // Excluded on both sides, must never show up as a change.
    site.write_staging("wp-content/cache/page.html", "cached");
    site.write_staging(".env", "SECRET=1");
}

#[test]
fn test_derived_change_map_converges_production() {
    let site = TestSite::new();
    seed(&site);

    let staging = by_path(scan(site.staging_root()).unwrap());
    let changes = diff(&staging, &production_inventory(&site));
    assert_eq!(
        changes.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "wp-content/plugins/old/old.php",
            "wp-content/themes/t/style.css",
            "wp-content/uploads/2024/01/logo.png",
        ]
    );

    let config = SyncConfig::new(site.production_root());
    let cache = MemoryCache::new();
    let files: Vec<String> = changes.keys().cloned().collect();
    let sync = Synchronizer::new(&config, Box::new(site.open_store()))
        .with_file_source(Box::new(StaticChanges::new(changes, ChangeList::default())))
        .with_cache(Box::new(cache.clone()));

    let results = sync.sync(&files, &[]);

    assert_eq!(results.files.success_count(), 3);
    assert!(results.is_clean());
    assert_eq!(production_inventory(&site), staging);
    site.assert_production_missing(".env");
    assert_eq!(cache.invalidated(), vec!["stl_file_changes".to_string()]);
}

#[test]
fn test_rerun_is_idempotent_for_copies_and_deletes() {
    let site = TestSite::new();
    seed(&site);

    let staging = by_path(scan(site.staging_root()).unwrap());
    let changes = diff(&staging, &production_inventory(&site));
    let files: Vec<String> = changes.keys().cloned().collect();
    let config = SyncConfig::new(site.production_root());
    let sync = Synchronizer::new(&config, Box::new(site.open_store()))
        .with_file_source(Box::new(StaticChanges::new(changes, ChangeList::default())));

    let first = sync.sync_files(&files);
    let second = sync.sync_files(&files);

    assert!(first.is_clean() && second.is_clean());
    assert_eq!(
        second.success["wp-content/plugins/old/old.php"],
        "File already deleted."
    );
    assert_eq!(
        second.success["wp-content/themes/t/style.css"],
        "File copied successfully."
    );
    assert_eq!(production_inventory(&site), staging);
}

#[test]
fn test_only_requested_files_are_touched() {
    let site = TestSite::new();
    seed(&site);

    let staging = by_path(scan(site.staging_root()).unwrap());
    let changes = diff(&staging, &production_inventory(&site));
    let config = SyncConfig::new(site.production_root());
    let sync = Synchronizer::new(&config, Box::new(site.open_store()))
        .with_file_source(Box::new(StaticChanges::new(changes, ChangeList::default())));

    let ledger = sync.sync_files(&["wp-content/themes/t/style.css", "index.php"]);

    assert_eq!(ledger.success_count(), 1);
    assert_eq!(ledger.error["index.php"], "File not found in change list.");
    assert_eq!(
        site.read_production("wp-content/themes/t/style.css"),
        "body{color:blue}"
    );
    assert_eq!(
        site.read_production("wp-content/plugins/old/old.php"),
        "<?php // gone"
    );
    site.assert_production_missing("wp-content/uploads/2024/01/logo.png");
}

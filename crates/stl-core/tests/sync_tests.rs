use std::cell::Cell;

use pretty_assertions::assert_eq;
use stl_core::{
    ChangeList, ChangeRecord, ChangeType, DB_CHANGES_CACHE_KEY, Error, FILE_CHANGES_CACHE_KEY,
    FileChangeSource, FileChanges, Group, MemoryCache, OrderedMap, ResultLedger, StaticChanges,
    SyncConfig, Synchronizer, TableRowRequest,
};
use stl_db::Value;
use stl_test_utils::site::TestSite;

const NO_FILES: [&str; 0] = [];

fn config(site: &TestSite) -> SyncConfig {
    SyncConfig::new(site.production_root()).with_staging_root(site.staging_root())
}

fn file_changes(entries: &[(&str, &str)]) -> FileChanges {
    entries
        .iter()
        .map(|(path, kind)| (path.to_string(), ChangeType::from(*kind)))
        .collect()
}

fn grouped(post_type: &str, section: &str, records: Vec<ChangeRecord>) -> ChangeList {
    let mut post_types = OrderedMap::new();
    post_types.insert(post_type, vec![Group::default().with_section(section, records)]);
    ChangeList {
        post_type_groups: Some(post_types),
        ..Default::default()
    }
}

struct FailingSource;

impl FileChangeSource for FailingSource {
    fn file_changes(&self) -> stl_core::Result<FileChanges> {
        Err(Error::ChangeSource {
            message: "comparer offline".into(),
        })
    }
}

#[test]
fn test_end_to_end_modified_file() {
    let site = TestSite::new();
    site.write_staging("a.txt", "X");
    site.write_production("a.txt", "old");

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store())).with_file_source(
        Box::new(StaticChanges::new(file_changes(&[("a.txt", "modified")]), ChangeList::default())),
    );
    let results = sync.sync(&["a.txt"], &[]);

    assert_eq!(site.read_production("a.txt"), "X");
    assert_eq!(results.files.success_count(), 1);
    assert_eq!(results.files.error_count(), 0);
    assert_eq!(results.db, ResultLedger::default());
}

#[test]
fn test_unlisted_file_fails_closed() {
    let site = TestSite::new();
    site.write_staging("secret.txt", "X");

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()));
    let results = sync.sync(&["secret.txt"], &[]);

    assert_eq!(results.files.error["secret.txt"], "File not found in change list.");
    site.assert_production_missing("secret.txt");
}

#[test]
fn test_file_source_failure_marks_every_file() {
    let site = TestSite::new();
    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()))
        .with_file_source(Box::new(FailingSource));

    let ledger = sync.sync_files(&["a.txt", "b.txt"]);

    assert_eq!(ledger.error_count(), 2);
    assert!(ledger.error["a.txt"].contains("comparer offline"));
}

#[test]
fn test_row_located_through_alias_is_applied_to_posts() {
    let site = TestSite::new();
    site.insert_staging(
        "posts",
        &[
            ("ID", Value::Integer(7)),
            ("post_title", Value::from("logo.png")),
            ("post_type", Value::from("attachment")),
        ],
    );
    let changes = grouped("post", "attachments", vec![ChangeRecord::new("added", 7)]);

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()))
        .with_db_source(Box::new(StaticChanges::new(FileChanges::new(), changes)));
    let results = sync.sync(&NO_FILES, &[TableRowRequest::new("posts", 7)]);

    assert_eq!(
        results.db.success["posts:7"],
        "Entry with ID 7 inserted successfully in table posts."
    );
    let row = site.production_row("posts", "ID", 7).unwrap();
    assert_eq!(row.get("post_type"), Some(&Value::from("attachment")));
}

#[test]
fn test_alias_section_request_runs_against_canonical_table() {
    let site = TestSite::new();
    site.insert_staging(
        "posts",
        &[("ID", Value::Integer(9)), ("post_type", Value::from("revision"))],
    );
    let changes = grouped("post", "child_posts", vec![ChangeRecord::new("added", 9)]);

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()))
        .with_db_source(Box::new(StaticChanges::new(FileChanges::new(), changes)));
    let ledger = sync.sync_db(&[TableRowRequest::new("child_posts", 9)]);

    assert_eq!(
        ledger.success["child_posts:9"],
        "Entry with ID 9 inserted successfully in table posts."
    );
    assert!(site.production_row("posts", "ID", 9).is_some());
}

#[test]
fn test_grouped_change_wins_over_flat_change() {
    let site = TestSite::new();
    site.insert_production("posts", &[("ID", Value::Integer(5)), ("post_title", Value::from("A"))]);
    site.insert_staging("posts", &[("ID", Value::Integer(5)), ("post_title", Value::from("B"))]);

    let mut changes = grouped("page", "posts", vec![ChangeRecord::new("modified", 5)]);
    changes
        .tables
        .insert("posts", vec![ChangeRecord::new("deleted", 5)]);

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()))
        .with_db_source(Box::new(StaticChanges::new(FileChanges::new(), changes)));
    let ledger = sync.sync_db(&[TableRowRequest::new("posts", "5")]);

    assert!(ledger.is_clean());
    let row = site.production_row("posts", "ID", 5).unwrap();
    assert_eq!(row.get("post_title"), Some(&Value::from("B")));
}

#[test]
fn test_row_failures_do_not_block_other_rows() {
    let site = TestSite::new();
    site.insert_staging("posts", &[("ID", Value::Integer(1))]);
    let mut changes = ChangeList::default();
    changes.tables.insert("posts", vec![ChangeRecord::new("added", 1)]);
    changes.tables.insert("actionlog", vec![ChangeRecord::new("added", 1)]);

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()))
        .with_db_source(Box::new(StaticChanges::new(FileChanges::new(), changes)));
    let ledger = sync.sync_db(&[
        TableRowRequest::new("actionlog", 1),
        TableRowRequest::new("posts", 1),
        TableRowRequest::new("posts", 2),
        TableRowRequest::default(),
    ]);

    assert_eq!(ledger.success.keys().collect::<Vec<_>>(), vec!["posts:1"]);
    assert_eq!(
        ledger.error["actionlog:1"],
        "Could not find primary key for table actionlog."
    );
    assert_eq!(
        ledger.error["posts:2"],
        "Entry with ID 2 not found in change list for table posts."
    );
    assert_eq!(ledger.error["entry #4"], "Invalid table data: missing table");
    assert!(site.production_row("posts", "ID", 1).is_some());
}

#[test]
fn test_db_sync_invalidates_cache_and_runs_hook_even_when_all_rows_fail() {
    let site = TestSite::new();
    let cache = MemoryCache::new();
    let hook_calls = Cell::new(0);

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()))
        .with_cache(Box::new(cache.clone()))
        .with_hook(Box::new(|| hook_calls.set(hook_calls.get() + 1)));
    let ledger = sync.sync_db(&[TableRowRequest::new("posts", 404)]);

    assert_eq!(ledger.error_count(), 1);
    assert_eq!(hook_calls.get(), 1);
    assert_eq!(cache.invalidated(), vec![DB_CHANGES_CACHE_KEY.to_string()]);
}

#[test]
fn test_sync_only_runs_requested_halves() {
    let site = TestSite::new();
    let cache = MemoryCache::new();
    let hook_calls = Cell::new(0);

    let sync = Synchronizer::new(&config(&site), Box::new(site.open_store()))
        .with_cache(Box::new(cache.clone()))
        .with_hook(Box::new(|| hook_calls.set(hook_calls.get() + 1)));

    let results = sync.sync(&NO_FILES, &[]);
    assert_eq!(results.files, ResultLedger::default());
    assert_eq!(results.db, ResultLedger::default());
    assert_eq!(hook_calls.get(), 0);
    assert!(cache.invalidated().is_empty());

    sync.sync(&["x.txt"], &[]);
    assert_eq!(hook_calls.get(), 0);
    assert_eq!(cache.invalidated(), vec![FILE_CHANGES_CACHE_KEY.to_string()]);
}

#[test]
fn test_independent_synchronizers_do_not_share_state() {
    let first = TestSite::new();
    let second = TestSite::new();
    first.write_staging("a.txt", "first");
    second.write_staging("a.txt", "second");
    let changes = StaticChanges::new(file_changes(&[("a.txt", "added")]), ChangeList::default());

    let sync_first = Synchronizer::new(&config(&first), Box::new(first.open_store()))
        .with_file_source(Box::new(changes.clone()));
    let sync_second = Synchronizer::new(&config(&second), Box::new(second.open_store()))
        .with_file_source(Box::new(changes));

    sync_first.sync_files(&["a.txt"]);
    sync_second.sync_files(&["a.txt"]);

    assert_eq!(first.read_production("a.txt"), "first");
    assert_eq!(second.read_production("a.txt"), "second");
}

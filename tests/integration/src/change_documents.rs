//! Database sync driven by comparer change-list documents on disk.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use stl_core::{JsonChangeSource, SyncConfig, Synchronizer, TableRowRequest};
use stl_db::Value;
use stl_test_utils::site::TestSite;

/// A change list mixing all three shapes, as seen mid-migration.
const MIXED_DOCUMENT: &str = r#"{
    "post_type_groups": {
        "page": [
            { "changes": { "posts": [ { "type": "modified", "id": 5 } ] } }
        ],
        "post": [
            { "changes": { "attachment_meta": [ { "type": "added", "id": "11" } ] } }
        ]
    },
    "content_groups": [
        { "changes": { "posts": [ { "type": "deleted", "id": 5 } ] } }
    ],
    "posts": [ { "type": "deleted", "id": "5" } ],
    "options": [ { "type": "modified", "id": "blogname" } ],
    "actionlog": [ { "type": "added", "id": 1 } ]
}"#;

fn write_document(site: &TestSite, content: &str) -> PathBuf {
    let path = site.scratch().join("db-changes.json");
    fs::write(&path, content).unwrap();
    path
}

fn seed(site: &TestSite) {
    site.insert_production("posts", &[("ID", Value::Integer(5)), ("post_title", Value::from("A"))]);
    site.insert_staging("posts", &[("ID", Value::Integer(5)), ("post_title", Value::from("B"))]);
    site.insert_staging(
        "postmeta",
        &[
            ("meta_id", Value::Integer(11)),
            ("post_id", Value::Integer(5)),
            ("meta_key", Value::from("_wp_attached_file")),
            ("meta_value", Value::from("2024/01/logo.png")),
        ],
    );
    site.insert_production(
        "options",
        &[("option_name", Value::from("blogname")), ("option_value", Value::from("Old"))],
    );
    site.insert_staging(
        "options",
        &[("option_name", Value::from("blogname")), ("option_value", Value::from("New"))],
    );
}

#[test]
fn test_mixed_document_applies_newest_shape_first() {
    let site = TestSite::new();
    seed(&site);
    let document = write_document(&site, MIXED_DOCUMENT);
    let hook_calls = Cell::new(0);

    let config = SyncConfig::new(site.production_root());
    let sync = Synchronizer::new(&config, Box::new(site.open_store()))
        .with_db_source(Box::new(JsonChangeSource::new(None, Some(document))))
        .with_hook(Box::new(|| hook_calls.set(hook_calls.get() + 1)));

    let ledger = sync.sync_db(&[
        TableRowRequest::new("posts", 5),
        TableRowRequest::new("postmeta", "11"),
        TableRowRequest::new("options", "blogname"),
        TableRowRequest::new("actionlog", 1),
    ]);

    assert_eq!(
        ledger.success.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["options:blogname", "postmeta:11", "posts:5"]
    );
    assert_eq!(
        ledger.error["actionlog:1"],
        "Could not find primary key for table actionlog."
    );
    assert_eq!(hook_calls.get(), 1);

    let post = site.production_row("posts", "ID", 5).unwrap();
    assert_eq!(post.get("post_title"), Some(&Value::from("B")));
    let meta = site.production_row("postmeta", "meta_id", 11).unwrap();
    assert_eq!(meta.get("meta_value"), Some(&Value::from("2024/01/logo.png")));
    let option = site.production_row("options", "option_name", "blogname").unwrap();
    assert_eq!(option.get("option_value"), Some(&Value::from("New")));
}

#[test]
fn test_flat_document_deletes_are_idempotent() {
    let site = TestSite::new();
    seed(&site);
    let document = write_document(&site, r#"{ "posts": [ { "type": "deleted", "id": 5 } ] }"#);

    let config = SyncConfig::new(site.production_root());
    let sync = Synchronizer::new(&config, Box::new(site.open_store()))
        .with_db_source(Box::new(JsonChangeSource::new(None, Some(document))));

    let first = sync.sync_db(&[TableRowRequest::new("posts", 5)]);
    let second = sync.sync_db(&[TableRowRequest::new("posts", 5)]);

    assert!(first.is_clean() && second.is_clean());
    assert_eq!(site.count_production("posts"), 0);
}

#[test]
fn test_unreadable_document_fails_every_row() {
    let site = TestSite::new();
    let document = write_document(&site, "{ not json");

    let config = SyncConfig::new(site.production_root());
    let sync = Synchronizer::new(&config, Box::new(site.open_store()))
        .with_db_source(Box::new(JsonChangeSource::new(None, Some(document))));

    let ledger = sync.sync_db(&[
        TableRowRequest::new("posts", 5),
        TableRowRequest::new("options", "blogname"),
    ]);

    assert_eq!(ledger.error_count(), 2);
    assert!(ledger.error["posts:5"].starts_with("Change list unavailable"));
}

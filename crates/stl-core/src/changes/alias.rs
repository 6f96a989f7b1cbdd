//! Section-name aliasing
//!
//! Grouped change lists label some sections by role rather than by table.
//! A request for `posts` also matches `attachments` and `child_posts`
//! sections; a request for `postmeta` also matches `attachment_meta`.

/// `(requested table, section label)` pairs that match besides identity.
const SECTION_ALIASES: &[(&str, &str)] = &[
    ("posts", "attachments"),
    ("posts", "child_posts"),
    ("postmeta", "attachment_meta"),
];

/// Whether a section labelled `section` holds rows for `table`.
pub fn section_matches(table: &str, section: &str) -> bool {
    section == table
        || SECTION_ALIASES
            .iter()
            .any(|(requested, label)| *requested == table && *label == section)
}

/// The real table behind a section label.
pub fn canonical_table(section: &str) -> &str {
    match section {
        "attachments" | "child_posts" => "posts",
        "attachment_meta" => "postmeta",
        other => other,
    }
}

/// The table a row operation runs against for a caller-facing name.
///
/// Only `attachment_meta` is rewritten here; it can reach the row applier
/// directly in a request.
pub fn actual_table(table: &str) -> &str {
    match table {
        "attachment_meta" => "postmeta",
        other => other,
    }
}

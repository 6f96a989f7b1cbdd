//! Change-list locator
//!
//! Resolves a `(table, id)` request to the one change record that should be
//! applied. Shapes are searched newest first: post-type groups, then legacy
//! content groups, then the flat per-table lists. The first match wins.

use crate::changes::alias::{canonical_table, section_matches};
use crate::changes::{ChangeList, ChangeRecord, Group, RowId};

/// Which change-list shape a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    PostTypeGroups,
    ContentGroups,
    Table,
}

/// A change record found for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedChange<'a> {
    pub record: &'a ChangeRecord,
    /// Section label (or table key) the record was listed under
    pub section: &'a str,
    pub origin: ChangeOrigin,
}

impl LocatedChange<'_> {
    /// The real table behind the section the record was found in.
    pub fn table(&self) -> &str {
        canonical_table(self.section)
    }
}

/// Find the change for `table`/`id`, or `None` if no shape lists it.
pub fn locate<'a>(changes: &'a ChangeList, table: &str, id: &RowId) -> Option<LocatedChange<'a>> {
    if let Some(post_types) = &changes.post_type_groups {
        let groups = post_types.values().flat_map(|groups| groups.iter());
        if let Some(found) = find_in_groups(groups, table, id, ChangeOrigin::PostTypeGroups) {
            return Some(found);
        }
    }

    if let Some(groups) = &changes.content_groups
        && let Some(found) = find_in_groups(groups.iter(), table, id, ChangeOrigin::ContentGroups)
    {
        return Some(found);
    }

    let (section, records) = changes.tables.iter().find(|(key, _)| *key == table)?;
    find_record(records, id).map(|record| LocatedChange {
        record,
        section,
        origin: ChangeOrigin::Table,
    })
}

fn find_in_groups<'a>(
    groups: impl Iterator<Item = &'a Group>,
    table: &str,
    id: &RowId,
    origin: ChangeOrigin,
) -> Option<LocatedChange<'a>> {
    for group in groups {
        for (section, records) in group.changes.iter() {
            if !section_matches(table, section) {
                continue;
            }
            if let Some(record) = find_record(records, id) {
                return Some(LocatedChange {
                    record,
                    section,
                    origin,
                });
            }
        }
    }
    None
}

fn find_record<'a>(records: &'a [ChangeRecord], id: &RowId) -> Option<&'a ChangeRecord> {
    records.iter().find(|record| record.id == *id)
}

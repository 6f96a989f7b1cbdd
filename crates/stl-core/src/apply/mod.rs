//! Appliers that carry staged changes over to production
//!
//! Both appliers work item by item and report through a
//! [`ResultLedger`](crate::ResultLedger); nothing is transactional and a
//! failed item never stops the next one.

mod files;
mod rows;

pub use files::FileChangeApplier;
pub use rows::{RowChangeApplier, TablePrefixes};

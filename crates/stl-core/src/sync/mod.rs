//! Synchronization orchestrator
//!
//! - **request**: the `(table, id)` pairs callers submit
//! - **synchronizer**: runs file and row syncs and reports per item

mod request;
mod synchronizer;

pub use request::TableRowRequest;
pub use synchronizer::Synchronizer;

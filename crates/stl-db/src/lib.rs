//! Relational data-store layer for staging2live
//!
//! The change appliers never talk to a database driver directly. They go
//! through the [`DataStore`] trait, which exposes exactly the operations a
//! row sync needs: primary-key discovery, column listing, single-row reads
//! and parameterized insert/update/delete. [`SqliteStore`] is the bundled
//! implementation; staging and production tables share one database and
//! are told apart by their table prefix.

pub mod error;
pub mod ident;
pub mod sqlite;
pub mod store;
pub mod value;

pub use error::{Error, Result};
pub use ident::quote_identifier;
pub use sqlite::SqliteStore;
pub use store::DataStore;
pub use value::{Row, Value};

//! Document store for PairUp
//!
//! JSON documents kept in SQLite through SQLx's `Any` driver. Each collection is
//! a table of `(id, body)` rows; filters and field-level updates are evaluated
//! with SQLite's JSON1 functions, and natural keys are enforced with unique
//! expression indexes.
//!
//! # Example
//!
//! ```rust,no_run
//! use pairup_db::{DbClient, DocumentStore, Filter};
//!
//! async fn lookup() -> Result<(), pairup_db::DbError> {
//!     let client = DbClient::from_url("sqlite::memory:").await?;
//!     let store = DocumentStore::new(client);
//!     store.init_schema().await?;
//!     let user = store.users().find_one(&Filter::by("email", "a@b.c")).await?;
//!     assert!(user.is_none());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod collection;
pub mod document;
pub mod error;
pub mod store;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

pub use client::{DbClient, DbTransaction};
pub use collection::Collection;
pub use document::{DeleteResult, Document, Filter, InsertOneResult, UpdateResult, ID_FIELD};
pub use error::DbError;
pub use store::{next_sequence_in, DocumentStore, BIODATA_SEQUENCE};

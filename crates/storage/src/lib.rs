//! Key-value persistence for CatCircle.
//!
//! Every collection is stored as one JSON blob under a fixed key. The
//! [`KeyValueStore`] trait is the seam; [`LocalDb`] adds typed access,
//! fixture seeding and the per-user key layout on top of it.

pub mod errors;
pub mod keys;
pub mod kv;
pub mod local_db;
pub mod sqlite;

pub use errors::{StorageError, StorageResult};
pub use kv::{InMemoryStore, KeyValueStore};
pub use local_db::LocalDb;
pub use sqlite::SqliteStore;

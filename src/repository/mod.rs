//! Repository Layer
//!
//! Key-value persistence port, its SQLite implementation, and the typed
//! records the application stores through it.

mod traits;
mod db;
mod lists_repo;


pub use traits::KeyValueStore;
pub use db::{init_db, SqliteStore};
pub use lists_repo::{
    ListsRepository, LEGACY_STORAGE_KEY, LIST_STORAGE_KEY, PENDING_STORAGE_KEY, ITEM_FREQUENCY_KEY,
};

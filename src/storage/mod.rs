//! Blog persistence
//!
//! SQLite-backed storage for blog records. Insertion order is preserved on
//! listing so that list statistics see blogs in the order they were added.

mod sqlite;

pub use sqlite::{BlogStore, StoreConfig};

//! Storage layer: the key-value boundary and the values kept in it.

pub mod cell;
pub mod db;
pub mod kv;

pub use cell::PersistentCell;
pub use db::Database;
pub use kv::{KeyValueStore, MemoryStore, StoreError};

/// Store key holding the persisted search term.
pub const SEARCH_KEY: &str = "search";

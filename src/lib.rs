//! Hacker Stories - searchable, dismissable story lists
//!
//! A story list filtered by a search term that persists in a key-value
//! store, loaded from a repository that can simulate network latency.
//! The terminal front end lives in the `stories` binary.

pub mod config;
pub mod storage;
pub mod stories;
pub mod view;

//! Story records, where they come from, and how they are narrowed.

pub mod filter;
pub mod models;
pub mod repository;

pub use filter::{dismiss, dismiss_in_place, filter};
pub use models::{seed_stories, Story};
pub use repository::{LoadError, StoryRepository, StorySource};

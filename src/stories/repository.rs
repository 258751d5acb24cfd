//! Story repository: where the story list comes from.
//!
//! A repository returns the built-in seed list or the records in a JSON
//! story file. It can answer immediately ([`StoryRepository::load`]) or
//! after a fixed delay standing in for a network round trip
//! ([`StoryRepository::load_delayed`]). The delayed load listens on a
//! shutdown channel and gives up as soon as it fires or its sender goes
//! away.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::broadcast;

use super::models::{seed_stories, Story};

/// Errors that can occur while loading stories.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The load was cancelled before it resolved.
    #[error("Story load was cancelled")]
    Cancelled,

    /// The story file could not be read.
    #[error("Failed to read stories from {path}: {reason}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error text.
        reason: String,
    },

    /// The story file is not a JSON array of story records.
    #[error("Failed to parse stories: {0}")]
    Parse(#[from] serde_json::Error),

    /// The background load task panicked or was aborted.
    #[error("Story load task failed: {0}")]
    Task(String),
}

/// Where the records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorySource {
    /// The built-in seed list.
    Seed,
    /// A JSON file holding an array of story records.
    File(PathBuf),
}

/// Supplies story collections, optionally after a delay.
#[derive(Debug, Clone)]
pub struct StoryRepository {
    source: StorySource,
    delay: Duration,
}

impl Default for StoryRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

impl StoryRepository {
    /// Repository over the seed list with no delay.
    pub fn seeded() -> Self {
        Self {
            source: StorySource::Seed,
            delay: Duration::ZERO,
        }
    }

    /// Repository over a JSON story file with no delay.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: StorySource::File(path.into()),
            delay: Duration::ZERO,
        }
    }

    /// Sets the delay applied by [`Self::load_delayed`].
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Configured source.
    pub fn source(&self) -> &StorySource {
        &self.source
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Loads the collection immediately.
    pub fn load(&self) -> Result<Vec<Story>, LoadError> {
        match &self.source {
            StorySource::Seed => Ok(seed_stories()),
            StorySource::File(path) => read_story_file(path),
        }
    }

    /// Loads the collection after the configured delay.
    ///
    /// Resolves to [`LoadError::Cancelled`] if `shutdown_rx` receives a
    /// message, or its sender is dropped, before the delay elapses.
    pub async fn load_delayed(
        &self,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<Vec<Story>, LoadError> {
        tracing::debug!("Loading stories in {:?}", self.delay);

        tokio::select! {
            _ = tokio::time::sleep(self.delay) => {}
            _ = shutdown_rx.recv() => {
                tracing::debug!("Story load cancelled");
                return Err(LoadError::Cancelled);
            }
        }

        let stories = self.load()?;
        tracing::debug!("Loaded {} stories", stories.len());
        Ok(stories)
    }
}

fn read_story_file(path: &Path) -> Result<Vec<Story>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&content)?)
}

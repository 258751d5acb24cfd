//! Configuration management
//!
//! Settings live in `~/.hacker-stories/config.yaml`. A missing file means
//! every setting takes its default.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::db::data_dir;
use crate::stories::StoryRepository;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["default_query", "load_delay_ms", "stories_file", "focus_search"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Search term used when none has been stored yet
    pub default_query: String,

    /// Simulated network delay before stories appear
    pub load_delay_ms: u64,

    /// JSON story file to load instead of the built-in list
    pub stories_file: Option<PathBuf>,

    /// Put the cursor in the search prompt when browsing starts
    pub focus_search: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_query: "React".to_string(),
            load_delay_ms: 2000,
            stories_file: None,
            focus_search: true,
        }
    }
}

impl Config {
    /// Loads the config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the config from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_saphyr::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.yaml"))
    }

    /// Reads a setting by name.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "default_query" => self.default_query.clone(),
            "load_delay_ms" => self.load_delay_ms.to_string(),
            "stories_file" => self
                .stories_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "focus_search" => self.focus_search.to_string(),
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        };
        Ok(value)
    }

    /// Updates a setting by name, validating the value.
    ///
    /// An empty value for `stories_file` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_query" => self.default_query = value.to_string(),
            "load_delay_ms" => {
                self.load_delay_ms = value
                    .parse()
                    .with_context(|| format!("'{value}' is not a number of milliseconds"))?;
            }
            "stories_file" => {
                self.stories_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "focus_search" => {
                self.focus_search = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => bail!("'{}' is not a boolean (use true or false)", value),
                };
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Configured load delay.
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    /// Repository for the configured source and delay.
    pub fn repository(&self) -> StoryRepository {
        let repo = match &self.stories_file {
            Some(path) => StoryRepository::from_file(path),
            None => StoryRepository::seeded(),
        };
        repo.with_delay(self.load_delay())
    }
}

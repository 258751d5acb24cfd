//! CLI commands for hacker-stories.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Interactive story browser.
pub mod browse;

/// Shell completion scripts.
pub mod completions;

/// Configuration viewing and management.
pub mod config;

/// List stories matching the saved search term.
pub mod list;

/// Change the saved search term.
pub mod search;

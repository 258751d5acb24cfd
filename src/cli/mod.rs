//! Command-line interface for hacker-stories.
//!
//! Provides the CLI commands for listing, searching and browsing the
//! story list.

/// Individual CLI command implementations.
pub mod commands;

/// Output formatting utilities.
pub mod format;

pub use format::OutputFormat;

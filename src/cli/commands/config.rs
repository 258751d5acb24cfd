//! Config command - manage configuration

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::config::{Config, CONFIG_KEYS};
use crate::storage::db::default_db_path;
use crate::storage::{Database, SEARCH_KEY};

#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    stories config                         Show configuration and saved values\n    \
    stories config get default_query       Print one setting\n    \
    stories config set load_delay_ms 0     Turn off the simulated delay\n    \
    stories config reset                   Forget the saved search term")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Forget the saved search term
    Reset,
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(),
        Some(ConfigCommand::Get { key }) => get_config(&key),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value),
        Some(ConfigCommand::Reset) => reset_search(),
    }
}

fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Hacker Stories Configuration".bold());
    println!();
    println!("  {}  {}", "Config:".dimmed(), Config::config_path()?.display());
    let db_path = default_db_path()?;
    println!("  {}  {}", "Database:".dimmed(), db_path.display());

    println!();
    println!("{}", "Settings:".bold());
    for key in CONFIG_KEYS {
        let value = config.get(key)?;
        let shown = if value.is_empty() {
            "(unset)".dimmed().to_string()
        } else {
            value
        };
        println!("  {:<14} {}", key.cyan(), shown);
    }

    println!();
    println!("{}", "Saved values:".bold());
    let db = Database::open(&db_path)?;
    let entries = db.entries()?;
    if entries.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (key, value) in entries {
        println!("  {:<14} {:?}", key.cyan(), value);
    }

    Ok(())
}

fn get_config(key: &str) -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("{} {} = {}", "Set".green(), key, value);
    Ok(())
}

fn reset_search() -> Result<()> {
    let db = Database::open_default()?;
    if db.remove(SEARCH_KEY)? {
        println!("{}", "Saved search term cleared".green());
    } else {
        println!("{}", "No saved search term".dimmed());
    }
    Ok(())
}

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod storage;
mod stories;
mod view;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "stories")]
#[command(version)]
#[command(about = "My Hacker Stories - search and dismiss stories from the terminal")]
#[command(long_about = "Shows a list of stories filtered by a search term.\n\n\
    The search term is saved between runs, so the next list starts where\n\
    the last one left off. Stories arrive after a short simulated delay.")]
#[command(after_help = "EXAMPLES:\n    \
    stories list               List stories matching the saved search\n    \
    stories search redux       Save a new search term and list matches\n    \
    stories list --dismiss 0   Hide a story from the listing\n    \
    stories browse             Search and dismiss interactively\n    \
    stories config             Show configuration\n\n\
    For more information about a command, run 'stories <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List stories matching the saved search term
    #[command(long_about = "Loads the story list and prints the stories whose title contains\n\
        the saved search term. Dismissed stories are hidden for this run only.")]
    List(commands::list::Args),

    /// Save a new search term and list matching stories
    #[command(long_about = "Replaces the saved search term, then lists matching stories.\n\
        Matching is a case-insensitive substring test on the title.")]
    Search(commands::search::Args),

    /// Browse stories interactively
    #[command(long_about = "Opens an interactive prompt. Type a search term, dismiss stories\n\
        by id, and watch the list update as stories load.")]
    Browse(commands::browse::Args),

    /// View and manage configuration settings
    #[command(long_about = "Provides subcommands to show, get, and set configuration values.\n\
        Configuration is stored in ~/.hacker-stories/config.yaml.")]
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "hacker_stories=debug,stories=debug"
    } else {
        "hacker_stories=info,stories=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::List(args) => commands::list::run(args),
        Commands::Search(args) => commands::search::run(args),
        Commands::Browse(args) => commands::browse::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Completions(args) => {
            commands::completions::generate_completions(&mut Cli::command(), args.shell);
            Ok(())
        }
    }
}

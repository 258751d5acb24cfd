//! Browse command - interactive story list.
//!
//! Reads commands from stdin while the story list loads in the
//! background. The screen is redrawn whenever the view reports a change.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use super::list::{apply_dismissals, print_view, LoadArgs};
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::storage::{Database, KeyValueStore};
use crate::view::{StoriesView, ViewEvent};

#[derive(clap::Args)]
#[command(after_help = "COMMANDS (while browsing):\n    \
    /TEXT or search TEXT    Change the search term\n    \
    d ID or dismiss ID      Dismiss a story\n    \
    list                    Redraw the list\n    \
    help                    Show these commands\n    \
    quit                    Exit")]
pub struct Args {
    /// Don't open the search prompt on start
    #[arg(long)]
    pub no_focus: bool,

    #[command(flatten)]
    pub load: LoadArgs,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Search(String),
    Dismiss(u64),
    List,
    Help,
    Quit,
    Invalid(String),
}

/// Parses an input line.
///
/// `/` alone clears the search. Blank lines redraw.
pub fn parse_input(line: &str) -> BrowseInput {
    let line = line.trim();

    if let Some(query) = line.strip_prefix('/') {
        return BrowseInput::Search(query.to_string());
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" | "list" | "ls" => BrowseInput::List,
        "search" | "s" => BrowseInput::Search(rest.to_string()),
        "dismiss" | "d" => match rest.parse() {
            Ok(id) => BrowseInput::Dismiss(id),
            Err(_) => BrowseInput::Invalid(format!("'{rest}' is not a story id")),
        },
        "help" | "?" => BrowseInput::Help,
        "quit" | "q" | "exit" => BrowseInput::Quit,
        other => BrowseInput::Invalid(format!("Unknown command '{other}'")),
    }
}

pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open_default()?;

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let result = rt.block_on(browse(&db, &config, &args));
    // A pending stdin read must not keep the process alive.
    rt.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn browse(db: &Database, config: &Config, args: &Args) -> Result<()> {
    let focus = config.focus_search && !args.no_focus;
    let mut view = super::list::build_view(db, config, focus);
    let mut events = view.subscribe();

    let pending = view.begin_load(args.load.repository(config))?;
    let load = pending.wait();
    tokio::pin!(load);
    let mut loading = true;

    println!("{}", "My Hacker Stories".bold());
    drain_changes(&mut events);
    redraw(&view, args.load.format)?;

    // Piped input is read all at once; let the list arrive first so the
    // commands apply to it.
    if !std::io::stdin().is_terminal() {
        let outcome = (&mut load).await;
        loading = false;
        if view.complete_load(outcome) {
            apply_dismissals(&mut view, &args.load.dismiss);
        }
        drain_changes(&mut events);
        redraw(&view, args.load.format)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if view.take_focus_request() {
        prompt()?;
    }

    loop {
        let answered = tokio::select! {
            outcome = &mut load, if loading => {
                loading = false;
                if view.complete_load(outcome) {
                    apply_dismissals(&mut view, &args.load.dismiss);
                }
                false
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match parse_input(&line) {
                    BrowseInput::Quit => break,
                    BrowseInput::Search(query) => {
                        if let Err(e) = view.on_query_change(query) {
                            eprintln!("{} {}", "Warning:".yellow(), e);
                        }
                    }
                    BrowseInput::Dismiss(id) => {
                        if view.on_dismiss(id) == 0 {
                            println!("{}", format!("No story with id {id}").dimmed());
                        }
                    }
                    BrowseInput::List => redraw(&view, args.load.format)?,
                    BrowseInput::Help => print_help(),
                    BrowseInput::Invalid(message) => {
                        println!("{} (type 'help' for commands)", message.yellow());
                    }
                }
                true
            }
        };

        let changed = drain_changes(&mut events);
        if changed {
            redraw(&view, args.load.format)?;
        }
        if changed || answered {
            prompt()?;
        }
    }

    view.dispose();
    Ok(())
}

/// Consumes pending events, returning true if any should trigger a redraw.
fn drain_changes(events: &mut broadcast::Receiver<ViewEvent>) -> bool {
    let mut changed = false;
    loop {
        match events.try_recv() {
            Ok(ViewEvent::Disposed) => {}
            Ok(_) => changed = true,
            // Missed events still mean something changed.
            Err(broadcast::error::TryRecvError::Lagged(_)) => changed = true,
            Err(_) => break,
        }
    }
    changed
}

fn redraw<S: KeyValueStore>(view: &StoriesView<S>, format: OutputFormat) -> Result<()> {
    println!();
    print_view(view, format)
}

fn prompt() -> Result<()> {
    print!("{} ", "search>".green());
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!("  {}  change the search term", "/TEXT, search TEXT".cyan());
    println!("  {}  dismiss a story", "d ID, dismiss ID  ".cyan());
    println!("  {}  redraw the list", "list              ".cyan());
    println!("  {}  exit", "quit              ".cyan());
}

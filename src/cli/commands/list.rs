//! List command - show the stories matching the saved search term.
//!
//! Loads the story list (after the configured delay), applies any
//! dismissals given on the command line, and prints the stories whose
//! title contains the persisted search term.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::format::truncate;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::storage::{Database, KeyValueStore, PersistentCell, SEARCH_KEY};
use crate::stories::{Story, StoryRepository};
use crate::view::{LoadState, StoriesView};

/// Options shared by every command that loads and prints stories.
#[derive(clap::Args, Debug, Default)]
pub struct LoadArgs {
    /// Dismiss the story with this objectID before printing (repeatable)
    #[arg(short, long, value_name = "ID")]
    pub dismiss: Vec<u64>,

    /// Override the simulated load delay
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Load stories from a JSON file instead of the built-in list
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output format: text (default), json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl LoadArgs {
    /// Repository for these options, falling back to the config.
    pub fn repository(&self, config: &Config) -> StoryRepository {
        let repo = match &self.file {
            Some(path) => StoryRepository::from_file(path),
            None => config.repository(),
        };
        match self.delay_ms {
            Some(ms) => repo.with_delay(Duration::from_millis(ms)),
            None => repo.with_delay(config.load_delay()),
        }
    }
}

/// Arguments for the list command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    stories list                   Show stories matching the saved search\n    \
    stories list --dismiss 1       Hide story 1 from this listing\n    \
    stories list --delay-ms 0      Skip the simulated network delay\n    \
    stories list --format json     Output as JSON")]
pub struct Args {
    #[command(flatten)]
    pub load: LoadArgs,
}

/// Executes the list command.
pub fn run(args: Args) -> Result<()> {
    execute(&args.load, None)
}

/// Loads, optionally updates the search term, then prints.
///
/// Shared with the search command, which passes its query in `new_query`.
pub fn execute(load: &LoadArgs, new_query: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open_default()?;
    let mut view = build_view(&db, &config, false);

    if let Some(query) = new_query {
        if let Err(e) = view.on_query_change(query) {
            eprintln!("{} {}", "Warning:".yellow(), e);
        }
    }

    let repo = load.repository(&config);
    if load.format == OutputFormat::Text && !repo.delay().is_zero() {
        println!("{}", "Loading ...".dimmed());
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(view.load(repo))?;
    apply_dismissals(&mut view, &load.dismiss);

    print_view(&view, load.format)
}

/// Dismisses every id given with `--dismiss`. Unknown ids are skipped.
pub fn apply_dismissals<S: KeyValueStore>(view: &mut StoriesView<S>, ids: &[u64]) {
    for id in ids {
        if view.on_dismiss(*id) == 0 {
            tracing::debug!("No story with objectID {} to dismiss", id);
        }
    }
}

/// Builds a view whose search term is persisted in `store`.
///
/// Warns on stderr if the store could not be read.
pub fn build_view<S: KeyValueStore>(store: S, config: &Config, focus: bool) -> StoriesView<S> {
    let search = PersistentCell::create(store, SEARCH_KEY, config.default_query.clone());
    if let Some(e) = search.read_error() {
        eprintln!(
            "{} {} (using default search '{}')",
            "Warning:".yellow(),
            e,
            config.default_query
        );
    }
    StoriesView::new(search, focus)
}

/// Prints the view in the requested format.
pub fn print_view<S: KeyValueStore>(view: &StoriesView<S>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view.snapshot())?;
            println!("{json}");
        }
        OutputFormat::Text => print_text(view),
    }
    Ok(())
}

fn print_text<S: KeyValueStore>(view: &StoriesView<S>) {
    println!(
        "{} {}",
        "Search:".bold(),
        if view.current_query().is_empty() {
            "(everything)".dimmed().to_string()
        } else {
            view.current_query().cyan().to_string()
        }
    );
    println!();

    match view.load_state() {
        LoadState::Idle | LoadState::Loading => {
            println!("{}", "Loading ...".dimmed());
            return;
        }
        LoadState::Failed(message) => {
            println!("{} {}", "Could not load stories:".red(), message);
            return;
        }
        LoadState::Loaded => {}
    }

    let visible = view.visible_stories();
    if visible.is_empty() {
        println!("{}", "No stories match.".dimmed());
        return;
    }
    print_story_table(&visible);
}

/// Prints stories as an aligned table.
pub fn print_story_table(stories: &[&Story]) {
    const ID_WIDTH: usize = 6;
    const TITLE_WIDTH: usize = 32;
    const AUTHOR_WIDTH: usize = 24;
    const COMMENTS_WIDTH: usize = 8;
    const POINTS_WIDTH: usize = 6;

    println!(
        "{}",
        format!(
            "{:>ID_WIDTH$}  {:<TITLE_WIDTH$}  {:<AUTHOR_WIDTH$}  {:>COMMENTS_WIDTH$}  {:>POINTS_WIDTH$}  {}",
            "ID", "TITLE", "AUTHOR", "COMMENTS", "POINTS", "URL"
        )
        .bold()
    );

    for story in stories {
        // Pad before colouring so escape codes don't count toward width.
        let title = format!("{:<TITLE_WIDTH$}", truncate(&story.title, TITLE_WIDTH));
        let author = format!("{:<AUTHOR_WIDTH$}", truncate(&story.author, AUTHOR_WIDTH));
        println!(
            "{:>ID_WIDTH$}  {}  {}  {:>COMMENTS_WIDTH$}  {:>POINTS_WIDTH$}  {}",
            story.object_id.to_string().cyan(),
            title,
            author.yellow(),
            story.num_comments,
            story.points,
            story.url.dimmed()
        );
    }
}

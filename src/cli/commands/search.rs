//! Search command - change the saved search term and list matches.
//!
//! The new term is persisted, so later `list` and `browse` runs start
//! from it.

use anyhow::Result;

use super::list::{self, LoadArgs};

#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    stories search redux           Show stories with 'redux' in the title\n    \
    stories search \"\"              Clear the search and show everything")]
pub struct Args {
    /// New search term (case-insensitive title match)
    pub query: String,

    #[command(flatten)]
    pub load: LoadArgs,
}

pub fn run(args: Args) -> Result<()> {
    list::execute(&args.load, Some(&args.query))
}

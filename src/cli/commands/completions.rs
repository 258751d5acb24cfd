//! Completions command - print a shell completion script.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    stories completions bash > ~/.local/share/bash-completion/completions/stories\n    \
    stories completions zsh > ~/.zfunc/_stories\n    \
    stories completions fish > ~/.config/fish/completions/stories.fish")]
pub struct Args {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL", value_enum)]
    pub shell: Shell,
}

/// Writes the completion script for `cmd` to stdout.
///
/// Takes the command from main.rs, which owns the `Cli` definition.
pub fn generate_completions(cmd: &mut Command, shell: Shell) {
    generate(shell, cmd, "stories", &mut io::stdout());
}

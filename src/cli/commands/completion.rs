//! cli::commands::completion
//!
//! Generate shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;

/// Handle the `completion` command.
///
/// Writes the completion script for the requested shell to stdout.
pub fn completion(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

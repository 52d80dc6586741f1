//! cli
//!
//! Command-line interface layer for Fleetwork.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Build the acting principal from `--as` / `--roles`
//! - Delegate to command handlers
//! - Does NOT mutate fleet state directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that drive the [`crate::fleet`] facade. Every fleet mutation
//! happens through the facade's gated operations.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::Result;

use crate::core::config::GlobalConfig;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = GlobalConfig::load()?;
    let ctx = commands::Context::from_cli(&cli, config)?;
    commands::dispatch(cli.command, &ctx)
}

//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the fleet snapshot (or starts fresh when none exists)
//! 2. Drives the facade with the acting principal
//! 3. Persists the snapshot when it mutated anything
//! 4. Formats and displays output
//!
//! Handlers do NOT touch fleet collections directly.

mod completion;
mod costing;
mod demo;
mod drivers;
mod init;
mod maintenance;
mod vehicles;

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::cli::args::{Cli, Command};
use crate::core::catalog::VehicleCatalog;
use crate::core::config::GlobalConfig;
use crate::core::types::Role;
use crate::fleet::authz::Principal;
use crate::fleet::log::{FileActionLog, DEFAULT_ACTION_LOG};
use crate::fleet::store::{StoreError, DEFAULT_DATA_DIR};
use crate::fleet::Fleet;
use crate::ui::{output, Verbosity};

/// Resolved execution context shared by all handlers.
pub struct Context {
    /// The acting principal built from `--as` / `--roles`.
    pub principal: Principal,
    /// Directory holding snapshots.
    pub data_dir: PathBuf,
    /// Explicit snapshot file, if any.
    pub snapshot: Option<PathBuf>,
    /// Company name for fresh fleets.
    pub company: String,
    /// Action-log file.
    pub action_log: PathBuf,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Context {
    /// Build the context from CLI flags and the loaded config.
    ///
    /// Flag values override config values; defaults fill the rest.
    pub fn from_cli(cli: &Cli, config: GlobalConfig) -> Result<Self> {
        let mut roles = Vec::with_capacity(cli.roles.len());
        for name in &cli.roles {
            let role = Role::parse(name).ok_or_else(|| {
                anyhow!(
                    "unknown role '{}', valid roles: admin, manager, dispatcher",
                    name
                )
            })?;
            roles.push(role);
        }

        Ok(Self {
            principal: Principal::new(&cli.acting_user, roles),
            data_dir: cli
                .data_dir
                .clone()
                .or(config.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            snapshot: cli.file.clone(),
            company: config.company.unwrap_or_else(|| "TransCo".to_string()),
            action_log: config
                .action_log
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ACTION_LOG)),
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        })
    }

    /// Load the snapshot, or start a fresh fleet when none exists yet.
    pub fn load_fleet(&self) -> Result<Fleet> {
        let mut fleet = match Fleet::load(
            VehicleCatalog::global(),
            &self.data_dir,
            self.snapshot.as_deref(),
        ) {
            Ok(fleet) => fleet,
            Err(StoreError::NotFound { path }) => {
                output::debug(
                    format!("no snapshot at {}; starting fresh", path.display()),
                    self.verbosity,
                );
                Fleet::new(&self.company)
            }
            Err(e) => return Err(e.into()),
        };
        fleet.set_action_log(Box::new(FileActionLog::new(&self.action_log)));
        Ok(fleet)
    }

    /// Persist the fleet to its snapshot file.
    pub fn save_fleet(&self, fleet: &Fleet) -> Result<()> {
        let path = fleet.save(&self.data_dir, self.snapshot.as_deref())?;
        output::debug(
            format!("snapshot written to {}", path.display()),
            self.verbosity,
        );
        Ok(())
    }
}

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init { name } => init::init(ctx, name),
        Command::Vehicle { command } => vehicles::run(ctx, command),
        Command::Driver { command } => drivers::run(ctx, command),
        Command::Maintain {
            vehicle_id,
            cost,
            description,
        } => maintenance::maintain(ctx, &vehicle_id, cost, &description),
        Command::Cost {
            vehicle_id,
            distance_km,
        } => costing::cost(ctx, &vehicle_id, distance_km),
        Command::Demo => demo::demo(ctx),
        Command::Completion { shell } => {
            completion::completion(shell);
            Ok(())
        }
    }
}

//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--as <user>`: Act as this user (recorded in the action log)
//! - `--roles <roles>`: Comma-separated roles held by the acting user
//! - `--data-dir <dir>`: Directory holding fleet snapshots
//! - `--file <file>`: Snapshot file (relative paths live under the data directory)
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Fleetwork - a transport company fleet manager
#[derive(Parser, Debug)]
#[command(name = "fw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Act as this user; recorded in the action log
    #[arg(long = "as", value_name = "USER", global = true, default_value = "operator")]
    pub acting_user: String,

    /// Roles held by the acting user (admin, manager, dispatcher)
    #[arg(
        long,
        value_name = "ROLES",
        global = true,
        value_delimiter = ',',
        default_value = "admin"
    )]
    pub roles: Vec<String>,

    /// Directory holding fleet snapshots
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Snapshot file; relative paths are placed under the data directory
    #[arg(long, value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty fleet and write its snapshot
    Init {
        /// Company name (defaults to the configured company)
        #[arg(long)]
        name: Option<String>,
    },

    /// Manage vehicles
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommand,
    },

    /// Manage drivers
    Driver {
        #[command(subcommand)]
        command: DriverCommand,
    },

    /// Run a maintenance request through the approval chain
    Maintain {
        /// Vehicle the work is for
        vehicle_id: String,
        /// Estimated cost of the work
        cost: f64,
        /// What the work is
        description: String,
    },

    /// Price a trip for a vehicle
    Cost {
        /// Vehicle to price
        vehicle_id: String,
        /// Trip distance in kilometers
        distance_km: f64,
    },

    /// Seed a demo fleet and walk through every subsystem
    Demo,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Vehicle subcommands.
#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    /// Add a vehicle to the fleet
    Add {
        /// Vehicle type tag (bus, truck, taxi)
        #[arg(long = "type", value_name = "TYPE")]
        vehicle_type: String,

        /// Unique vehicle id
        #[arg(long)]
        id: String,

        /// Model name
        #[arg(long)]
        model: String,

        /// Year of manufacture (1900 or later)
        #[arg(long)]
        year: i32,

        /// Passenger capacity
        #[arg(long)]
        capacity: u32,

        /// Route number (buses)
        #[arg(long)]
        route: Option<String>,

        /// Cargo rating in tons (trucks)
        #[arg(long)]
        cargo_tons: Option<f64>,

        /// License plate (taxis)
        #[arg(long)]
        plate: Option<String>,

        /// Initial status (idle, on_route, maintenance, retired)
        #[arg(long)]
        status: Option<String>,
    },

    /// List all vehicles
    List,

    /// Search vehicles by model substring (case-insensitive)
    Search {
        /// Substring to look for
        query: String,
    },

    /// Show capacity totals per vehicle type
    Stats,

    /// Remove a vehicle (absent ids are ignored)
    Remove {
        /// Vehicle id to remove
        id: String,
    },

    /// Update a vehicle's last reported location
    Locate {
        /// Vehicle id
        id: String,
        /// Reported position
        location: String,
    },
}

/// Driver subcommands.
#[derive(Subcommand, Debug)]
pub enum DriverCommand {
    /// Hire a driver
    Add {
        /// Unique driver id
        #[arg(long)]
        id: String,

        /// Driver name
        #[arg(long)]
        name: String,

        /// License category
        #[arg(long)]
        license: String,

        /// Home city
        #[arg(long)]
        city: String,

        /// Home street
        #[arg(long)]
        street: String,

        /// House number
        #[arg(long)]
        house: String,
    },

    /// List all drivers
    List,

    /// Assign a driver to a vehicle
    Assign {
        /// Driver id
        driver_id: String,
        /// Vehicle id
        vehicle_id: String,
    },

    /// Remove a driver (absent ids are ignored)
    Remove {
        /// Driver id to remove
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_vehicle_add() {
        let cli = Cli::try_parse_from([
            "fw", "vehicle", "add", "--type", "bus", "--id", "B-1", "--model", "LiAZ", "--year",
            "2020", "--capacity", "110", "--route", "42",
        ])
        .unwrap();
        match cli.command {
            Command::Vehicle {
                command: VehicleCommand::Add { vehicle_type, .. },
            } => assert_eq!(vehicle_type, "bus"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn roles_flag_splits_on_commas() {
        let cli = Cli::try_parse_from([
            "fw",
            "--as",
            "bob",
            "--roles",
            "dispatcher,manager",
            "vehicle",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.acting_user, "bob");
        assert_eq!(cli.roles, vec!["dispatcher", "manager"]);
    }

    #[test]
    fn default_principal_is_operator_admin() {
        let cli = Cli::try_parse_from(["fw", "vehicle", "list"]).unwrap();
        assert_eq!(cli.acting_user, "operator");
        assert_eq!(cli.roles, vec!["admin"]);
    }
}

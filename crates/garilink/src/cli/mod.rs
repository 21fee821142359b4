//! Command-line interface for garilink.
//!
//! This module provides the CLI structure and command handlers for the
//! `garilink` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DashboardCommand, GroupCommand, MaintenanceCommand, ProfileCommand,
    ProviderCommand, ReminderCommand, StatsCommand, UnitsArg, VehicleCommand,
};

/// garilink - Your vehicle's companion, on the command line
///
/// Manages vehicle records, maintenance history, reminders, service-provider
/// discovery and community groups, backed by a local database.
#[derive(Debug, Parser)]
#[command(name = "garilink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCommand),

    /// Manage maintenance history
    #[command(subcommand)]
    Maintenance(MaintenanceCommand),

    /// Manage reminders
    #[command(subcommand)]
    Reminder(ReminderCommand),

    /// Discover service providers
    #[command(subcommand)]
    Provider(ProviderCommand),

    /// Community discussion groups
    #[command(subcommand)]
    Group(GroupCommand),

    /// View or update the user profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Rank upcoming services across all vehicles
    Dashboard(DashboardCommand),

    /// Show record-store statistics
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

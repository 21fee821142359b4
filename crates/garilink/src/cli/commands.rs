//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::DistanceUnits;
use crate::search::ProviderCategory;

/// Vehicle management commands.
#[derive(Debug, Subcommand)]
pub enum VehicleCommand {
    /// Add a vehicle
    Add {
        /// Manufacturer, e.g. "Toyota"
        #[arg(long)]
        make: String,

        /// Model name, e.g. "Corolla"
        #[arg(long)]
        model: String,

        /// Model year
        #[arg(long)]
        year: u16,

        /// License plate
        #[arg(long)]
        plate: String,

        /// Current odometer reading in kilometres
        #[arg(long)]
        mileage: u32,
    },

    /// List all vehicles
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one vehicle
    Show {
        /// Vehicle id
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Update a vehicle's mileage or next-service target
    Update {
        /// Vehicle id
        id: String,

        /// New odometer reading in kilometres
        #[arg(long)]
        mileage: Option<u32>,

        /// Odometer reading at which the next service is expected
        #[arg(long)]
        next_service: Option<u32>,
    },

    /// Remove a vehicle (maintenance history is kept)
    Remove {
        /// Vehicle id
        id: String,
    },
}

/// Maintenance history commands.
#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// Record a completed service
    Add {
        /// Id of the serviced vehicle
        vehicle_id: String,

        /// What was done, e.g. "Oil Change"
        #[arg(long)]
        service: String,

        /// Odometer reading at the time of service
        #[arg(long)]
        mileage: u32,

        /// Cost of the service
        #[arg(long)]
        cost: f64,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List a vehicle's maintenance history, most recent first
    List {
        /// Vehicle id
        vehicle_id: String,

        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Remove a maintenance record
    Remove {
        /// Record id
        id: String,
    },
}

/// Reminder commands.
#[derive(Debug, Subcommand)]
pub enum ReminderCommand {
    /// Add a reminder targeting a date or a mileage
    Add {
        /// Id of the vehicle
        vehicle_id: String,

        /// Short description, e.g. "Renew insurance"
        #[arg(long)]
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "mileage", required_unless_present = "mileage")]
        date: Option<String>,

        /// Due odometer reading in kilometres
        #[arg(long)]
        mileage: Option<u32>,

        /// Repeat every N days after completion (date reminders)
        #[arg(long, conflicts_with = "every_km")]
        every_days: Option<u32>,

        /// Repeat every N kilometres after completion (mileage reminders)
        #[arg(long)]
        every_km: Option<u32>,
    },

    /// List reminders
    List {
        /// Only reminders for this vehicle
        #[arg(long)]
        vehicle_id: Option<String>,

        /// Include completed reminders
        #[arg(short, long)]
        all: bool,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Complete a reminder (recurring reminders roll forward)
    Complete {
        /// Reminder id
        id: String,
    },

    /// Remove a reminder
    Remove {
        /// Reminder id
        id: String,
    },
}

/// Service-provider discovery commands.
#[derive(Debug, Subcommand)]
pub enum ProviderCommand {
    /// Add a service provider
    Add {
        /// Business name
        name: String,

        /// Location, e.g. "Westlands, Nairobi"
        #[arg(long)]
        location: String,

        /// Offered service (repeatable)
        #[arg(long = "service", required = true)]
        services: Vec<String>,

        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,

        /// Average rating, 0.0 to 5.0
        #[arg(long)]
        rating: Option<f32>,
    },

    /// List all providers
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Search providers by text and/or category
    Search {
        /// Free-text query over name, location and services
        #[arg(default_value = "")]
        query: String,

        /// Restrict to one category
        #[arg(long, value_enum)]
        category: Option<ProviderCategory>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Community group commands.
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Create a discussion group
    Create {
        /// Group name
        name: String,

        /// What the group is about
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List all groups
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Post to a group
    Post {
        /// Group id
        group_id: String,

        /// Post body
        body: String,
    },

    /// List a group's posts, most recent first
    Posts {
        /// Group id
        group_id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Profile commands.
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the current user's profile
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Update the current user's profile
    Set {
        /// Display name
        #[arg(long)]
        display_name: Option<String>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Preferred distance units
        #[arg(long, value_enum)]
        units: Option<UnitsArg>,
    },
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Distance units argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitsArg {
    /// Kilometres
    Km,
    /// Miles
    Mi,
}

impl From<UnitsArg> for DistanceUnits {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Km => Self::Km,
            UnitsArg::Mi => Self::Mi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_arg_conversion() {
        assert_eq!(DistanceUnits::from(UnitsArg::Km), DistanceUnits::Km);
        assert_eq!(DistanceUnits::from(UnitsArg::Mi), DistanceUnits::Mi);
    }

    #[test]
    fn test_vehicle_command_debug() {
        let cmd = VehicleCommand::List { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("List"));
    }

    #[test]
    fn test_dashboard_command_debug() {
        let cmd = DashboardCommand { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}

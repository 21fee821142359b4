//! Entity model for garilink.
//!
//! This module defines the persisted entity types: vehicles, their
//! maintenance history and reminders, service providers, community groups,
//! and the user profile. Each type owns one record-store namespace.

mod community;
mod maintenance;
mod profile;
mod provider;
mod reminder;
mod vehicle;

pub use community::{Group, GroupPost};
pub use maintenance::{sort_by_date_desc, MaintenanceRecord};
pub use profile::{DistanceUnits, UserProfile};
pub use provider::ServiceProvider;
pub use reminder::{Recurrence, Reminder, ReminderTarget};
pub use vehicle::Vehicle;

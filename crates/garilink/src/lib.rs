//! `garilink` - Local-first data core for the GariLink vehicle companion
//!
//! This library provides the persisted record store, entity model, derived
//! service-due computation and search utilities behind the `garilink` CLI.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod due;
pub mod error;
pub mod logging;
pub mod model;
pub mod search;
pub mod store;

pub use config::Config;
pub use due::{rank_upcoming, service_due, ServiceDue, UpcomingService};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use store::{Entity, RecordStore, StoreStats};

//! Maintenance history entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A completed service on one vehicle.
///
/// Maintenance records are immutable historical facts: they are added and
/// removed, never edited. The CLI exposes no update path for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Unique identifier (assigned by the record store).
    pub id: String,

    /// Id of the vehicle this record belongs to.
    pub vehicle_id: String,

    /// What was done, e.g. "Oil Change".
    pub service_type: String,

    /// When the service happened.
    pub serviced_at: DateTime<Utc>,

    /// Odometer reading at the time of service, in kilometres.
    pub mileage: u32,

    /// Cost of the service.
    pub cost: f64,

    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MaintenanceRecord {
    /// Create a new maintenance record dated now.
    #[must_use]
    pub fn new(
        vehicle_id: impl Into<String>,
        service_type: impl Into<String>,
        mileage: u32,
        cost: f64,
    ) -> Self {
        Self {
            id: String::new(),
            vehicle_id: vehicle_id.into(),
            service_type: service_type.into(),
            serviced_at: Utc::now(),
            mileage,
            cost,
            notes: None,
        }
    }

    /// Attach free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Entity for MaintenanceRecord {
    const NAMESPACE: &'static str = "maintenance_records";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Sort maintenance records by service date, most recent first.
///
/// The record store returns lists in insertion order; date ordering is the
/// caller's job.
pub fn sort_by_date_desc(records: &mut [MaintenanceRecord]) {
    records.sort_by(|a, b| b.serviced_at.cmp(&a.serviced_at));
}

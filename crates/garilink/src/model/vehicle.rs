//! Vehicle entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A vehicle owned by exactly one user.
///
/// `current_mileage` is intended to be monotonically increasing but is not
/// enforced anywhere; owners occasionally correct odometer typos downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier (assigned by the record store).
    pub id: String,

    /// Id of the owning user.
    pub owner_id: String,

    /// Manufacturer, e.g. "Toyota".
    pub make: String,

    /// Model name, e.g. "Corolla".
    pub model: String,

    /// Model year.
    pub year: u16,

    /// License plate as displayed.
    pub license_plate: String,

    /// Current odometer reading in kilometres.
    pub current_mileage: u32,

    /// Odometer reading at which the next service is expected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_service_mileage: Option<u32>,

    /// When this vehicle record was created.
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Create a new vehicle record.
    ///
    /// The id is left empty; the record store assigns one on `add`.
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        license_plate: impl Into<String>,
        current_mileage: u32,
    ) -> Self {
        Self {
            id: String::new(),
            owner_id: owner_id.into(),
            make: make.into(),
            model: model.into(),
            year,
            license_plate: license_plate.into(),
            current_mileage,
            next_service_mileage: None,
            created_at: Utc::now(),
        }
    }

    /// One-line label for CLI output, e.g. "2018 Toyota Corolla (KDA 123A)".
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {} {} ({})",
            self.year, self.make, self.model, self.license_plate
        )
    }
}

impl Entity for Vehicle {
    const NAMESPACE: &'static str = "vehicles";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

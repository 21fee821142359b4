//! Derived service-due computation.
//!
//! Given a vehicle's current mileage and the target mileage for its next
//! service, decides whether service is due and how much distance remains.
//! Due state is always derived at read time; nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::Vehicle;

/// Whether a service is due and the distance remaining until it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceDue {
    /// True when the target mileage has been reached or passed.
    pub is_due: bool,
    /// Distance remaining in kilometres; negative when overdue.
    pub km_remaining: i64,
}

/// Compute due state from current and target mileage.
///
/// `km_remaining = next - current` (may be negative), due iff it is `<= 0`.
/// Pure integer arithmetic, no error conditions.
#[must_use]
pub fn service_due(current_mileage: u32, next_service_mileage: u32) -> ServiceDue {
    let km_remaining = i64::from(next_service_mileage) - i64::from(current_mileage);
    ServiceDue {
        is_due: km_remaining <= 0,
        km_remaining,
    }
}

/// Due state for a date-targeted reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateDue {
    /// True when the target date has been reached or passed.
    pub is_due: bool,
    /// Whole days remaining; negative when overdue.
    pub days_remaining: i64,
}

/// Compute due state for a date target relative to `now`.
#[must_use]
pub fn reminder_due(target: DateTime<Utc>, now: DateTime<Utc>) -> DateDue {
    let days_remaining = (target - now).num_days();
    DateDue {
        is_due: target <= now,
        days_remaining,
    }
}

/// One vehicle's upcoming service, as ranked on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingService {
    /// Id of the vehicle.
    pub vehicle_id: String,
    /// Display label for the vehicle.
    pub label: String,
    /// Derived due state.
    pub due: ServiceDue,
}

/// Rank upcoming services in place: due items first, then ascending by
/// remaining distance. Stable two-key sort.
pub fn rank_upcoming(upcoming: &mut [UpcomingService]) {
    upcoming.sort_by(|a, b| {
        b.due
            .is_due
            .cmp(&a.due.is_due)
            .then(a.due.km_remaining.cmp(&b.due.km_remaining))
    });
}

/// Build the ranked dashboard list from a set of vehicles.
///
/// Vehicles without a next-service mileage are skipped.
#[must_use]
pub fn upcoming_services(vehicles: &[Vehicle]) -> Vec<UpcomingService> {
    let mut upcoming: Vec<UpcomingService> = vehicles
        .iter()
        .filter_map(|vehicle| {
            vehicle.next_service_mileage.map(|next| UpcomingService {
                vehicle_id: vehicle.id.clone(),
                label: vehicle.label(),
                due: service_due(vehicle.current_mileage, next),
            })
        })
        .collect();
    rank_upcoming(&mut upcoming);
    upcoming
}

//! Reminder entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// What a reminder is anchored to: a future date or a future odometer reading.
///
/// The two are mutually exclusive by construction; a reminder targets exactly
/// one of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReminderTarget {
    /// Due on or after this date.
    Date(DateTime<Utc>),
    /// Due at or past this odometer reading in kilometres.
    Mileage(u32),
}

/// How a completed reminder rolls forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Recurrence {
    /// Repeat every N days (date-targeted reminders).
    Days(u32),
    /// Repeat every N kilometres (mileage-targeted reminders).
    Kilometres(u32),
}

/// A reminder attached to one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique identifier (assigned by the record store).
    pub id: String,

    /// Id of the vehicle this reminder belongs to.
    pub vehicle_id: String,

    /// Short description, e.g. "Renew insurance".
    pub title: String,

    /// When or at what mileage this reminder is due.
    pub target: ReminderTarget,

    /// Whether the reminder has been completed.
    pub completed: bool,

    /// Optional recurrence rule applied on completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,

    /// When this reminder was created.
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Create a new reminder.
    #[must_use]
    pub fn new(
        vehicle_id: impl Into<String>,
        title: impl Into<String>,
        target: ReminderTarget,
    ) -> Self {
        Self {
            id: String::new(),
            vehicle_id: vehicle_id.into(),
            title: title.into(),
            target,
            completed: false,
            recurrence: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a recurrence rule.
    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Complete this reminder.
    ///
    /// A recurring reminder rolls its target forward from the old target and
    /// stays open. A recurrence rule that doesn't apply to the target kind
    /// (days on a mileage target, or kilometres on a date target) is ignored
    /// and the reminder is simply marked completed.
    pub fn complete(&mut self) {
        match (self.recurrence, self.target) {
            (Some(Recurrence::Days(days)), ReminderTarget::Date(date)) => {
                self.target = ReminderTarget::Date(date + Duration::days(i64::from(days)));
            }
            (Some(Recurrence::Kilometres(km)), ReminderTarget::Mileage(mileage)) => {
                self.target = ReminderTarget::Mileage(mileage.saturating_add(km));
            }
            _ => {
                self.completed = true;
            }
        }
    }
}

impl Entity for Reminder {
    const NAMESPACE: &'static str = "reminders";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_new() {
        let reminder = Reminder::new("vehicle-1", "Renew insurance", ReminderTarget::Mileage(55_000));

        assert!(reminder.id.is_empty());
        assert_eq!(reminder.vehicle_id, "vehicle-1");
        assert!(!reminder.completed);
        assert!(reminder.recurrence.is_none());
    }

    #[test]
    fn test_complete_without_recurrence() {
        let mut reminder = Reminder::new("v", "Inspection", ReminderTarget::Date(Utc::now()));
        reminder.complete();
        assert!(reminder.completed);
    }

    #[test]
    fn test_complete_rolls_date_forward() {
        let start = Utc::now();
        let mut reminder = Reminder::new("v", "Oil change", ReminderTarget::Date(start))
            .with_recurrence(Recurrence::Days(90));

        reminder.complete();

        assert!(!reminder.completed);
        assert_eq!(
            reminder.target,
            ReminderTarget::Date(start + Duration::days(90))
        );
    }

    #[test]
    fn test_complete_rolls_mileage_forward() {
        let mut reminder = Reminder::new("v", "Oil change", ReminderTarget::Mileage(50_000))
            .with_recurrence(Recurrence::Kilometres(5_000));

        reminder.complete();

        assert!(!reminder.completed);
        assert_eq!(reminder.target, ReminderTarget::Mileage(55_000));
    }

    #[test]
    fn test_complete_mismatched_recurrence_marks_done() {
        let mut reminder = Reminder::new("v", "Inspection", ReminderTarget::Mileage(50_000))
            .with_recurrence(Recurrence::Days(30));

        reminder.complete();

        assert!(reminder.completed);
        assert_eq!(reminder.target, ReminderTarget::Mileage(50_000));
    }

    #[test]
    fn test_target_serialization() {
        let target = ReminderTarget::Mileage(55_000);
        let json = serde_json::to_string(&target).unwrap();
        assert!(json.contains("mileage"));

        let deserialized: ReminderTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(target, deserialized);
    }

    #[test]
    fn test_reminder_serialization() {
        let reminder = Reminder::new("v", "Rotate tires", ReminderTarget::Mileage(60_000))
            .with_recurrence(Recurrence::Kilometres(10_000));
        let json = serde_json::to_string(&reminder).unwrap();
        let deserialized: Reminder = serde_json::from_str(&json).unwrap();
        assert_eq!(reminder, deserialized);
    }

    #[test]
    fn test_reminder_namespace() {
        assert_eq!(Reminder::NAMESPACE, "reminders");
    }
}

//! User profile entity.

use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Preferred distance units for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnits {
    /// Kilometres.
    #[default]
    Km,
    /// Miles.
    Mi,
}

impl std::fmt::Display for DistanceUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Km => write!(f, "km"),
            Self::Mi => write!(f, "mi"),
        }
    }
}

/// A user's profile and preferences.
///
/// The identity backend itself is out of scope; `user_id` is the stable
/// identifier it provides, and the profile record is local state keyed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier (assigned by the record store).
    pub id: String,

    /// Stable identifier from the identity backend.
    pub user_id: String,

    /// Display name.
    pub display_name: String,

    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Preferred distance units.
    pub units: DistanceUnits,
}

impl UserProfile {
    /// Create a new profile for the given user.
    #[must_use]
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            display_name: display_name.into(),
            email: None,
            units: DistanceUnits::default(),
        }
    }
}

impl Entity for UserProfile {
    const NAMESPACE: &'static str = "profiles";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

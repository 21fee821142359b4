//! Service-provider entity.

use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A service provider discoverable by vehicle owners.
///
/// Providers describe what they do as free-text service strings
/// (e.g. "Engine Repair", "Full Car Wash"); category membership is derived
/// from those strings by the search utilities, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    /// Unique identifier (assigned by the record store).
    pub id: String,

    /// Business name.
    pub name: String,

    /// Offered services as free-text strings.
    pub services: Vec<String>,

    /// Human-readable location, e.g. "Westlands, Nairobi".
    pub location: String,

    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Average user rating, 0.0 to 5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl ServiceProvider {
    /// Create a new service provider.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        services: Vec<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            services,
            location: location.into(),
            phone: None,
            rating: None,
        }
    }
}

impl Entity for ServiceProvider {
    const NAMESPACE: &'static str = "service_providers";

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
    fn test_provider_new() {
        let provider = ServiceProvider::new(
            "Mo's Garage",
            vec!["Engine Repair".to_string()],
            "Westlands, Nairobi",
        );

        assert!(provider.id.is_empty());
        assert_eq!(provider.name, "Mo's Garage");
        assert_eq!(provider.services.len(), 1);
        assert!(provider.phone.is_none());
        assert!(provider.rating.is_none());
    }

    #[test]
    fn test_provider_serialization() {
        let mut provider = ServiceProvider::new(
            "Sparkle Wash",
            vec!["Full Car Wash".to_string(), "Detailing".to_string()],
            "Kilimani",
        );
        provider.rating = Some(4.5);

        let json = serde_json::to_string(&provider).unwrap();
        let deserialized: ServiceProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(provider, deserialized);
    }

    #[test]
    fn test_provider_namespace() {
        assert_eq!(ServiceProvider::NAMESPACE, "service_providers");
    }
}

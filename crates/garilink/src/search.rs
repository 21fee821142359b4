//! Search and filter utilities for service-provider discovery.
//!
//! Case-insensitive substring filtering over text fields, and category
//! filtering via a static keyword-to-category mapping table. Deterministic,
//! side-effect free; input order is preserved.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::ServiceProvider;

/// A service-provider category derived from service strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCategory {
    /// General repair and maintenance workshops.
    Mechanics,
    /// Washing, valeting and detailing.
    CarWash,
    /// Towing and roadside recovery.
    Towing,
    /// Parts and accessories dealers.
    SpareParts,
    /// Vehicle inspection and valuation.
    Inspection,
}

/// A keyword rule mapping service strings to one category.
#[derive(Debug)]
pub struct CategoryRule {
    /// The category this rule assigns.
    pub category: ProviderCategory,

    /// Description of what this category covers.
    pub description: &'static str,

    /// A provider belongs to the category iff any of its service strings
    /// contains one of these keywords (case-insensitive).
    pub keywords: &'static [&'static str],
}

/// The static keyword-to-category mapping table.
#[must_use]
pub fn category_rules() -> &'static [CategoryRule] {
    &[
        CategoryRule {
            category: ProviderCategory::Mechanics,
            description: "General repair and maintenance workshops",
            keywords: &["Repair", "Maintenance", "Diagnostics"],
        },
        CategoryRule {
            category: ProviderCategory::CarWash,
            description: "Washing, valeting and detailing",
            keywords: &["Wash", "Detailing", "Valet"],
        },
        CategoryRule {
            category: ProviderCategory::Towing,
            description: "Towing and roadside recovery",
            keywords: &["Towing", "Recovery", "Roadside"],
        },
        CategoryRule {
            category: ProviderCategory::SpareParts,
            description: "Parts and accessories dealers",
            keywords: &["Parts", "Spares", "Accessories"],
        },
        CategoryRule {
            category: ProviderCategory::Inspection,
            description: "Vehicle inspection and valuation",
            keywords: &["Inspection", "Assessment", "Valuation"],
        },
    ]
}

/// Case-insensitive substring match of `query` against any of `fields`.
///
/// An empty query matches everything.
#[must_use]
pub fn matches_text(fields: &[&str], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Check whether a provider belongs to a category.
///
/// True iff any of the provider's service strings contains one of the
/// category's mapped keywords, case-insensitively.
#[must_use]
pub fn provider_in_category(provider: &ServiceProvider, category: ProviderCategory) -> bool {
    let Some(rule) = category_rules().iter().find(|r| r.category == category) else {
        return false;
    };
    provider.services.iter().any(|service| {
        let service = service.to_lowercase();
        rule.keywords
            .iter()
            .any(|keyword| service.contains(&keyword.to_lowercase()))
    })
}

/// Filter providers to one category, preserving input order.
#[must_use]
pub fn filter_by_category(
    providers: &[ServiceProvider],
    category: ProviderCategory,
) -> Vec<&ServiceProvider> {
    providers
        .iter()
        .filter(|provider| provider_in_category(provider, category))
        .collect()
}

/// Free-text search over provider name, location and service strings,
/// preserving input order.
#[must_use]
pub fn search_providers<'a>(
    providers: &'a [ServiceProvider],
    query: &str,
) -> Vec<&'a ServiceProvider> {
    providers
        .iter()
        .filter(|provider| {
            let mut fields: Vec<&str> = vec![&provider.name, &provider.location];
            fields.extend(provider.services.iter().map(String::as_str));
            matches_text(&fields, query)
        })
        .collect()
}

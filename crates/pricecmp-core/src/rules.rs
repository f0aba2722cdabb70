//! Optional YAML overrides for the built-in rule tables.
//!
//! The built-in floors and store tables are hand-tuned for a narrow set of
//! categories. This file lets an operator extend them without a rebuild:
//!
//! ```yaml
//! price_floors:
//!   - category: laptop
//!     min_price: "200"
//! marketplace_stores: [reverb]
//! extra_stores:
//!   - pattern: "micro center"
//!     id: microcenter
//!     name: Micro Center
//!     tier: 3
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::ProductCategory;
use crate::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleOverrides {
    #[serde(default)]
    pub price_floors: Vec<PriceFloorOverride>,
    /// Store ids (as produced by the resolver) to treat as marketplaces.
    #[serde(default)]
    pub marketplace_stores: Vec<String>,
    #[serde(default)]
    pub extra_stores: Vec<ExtraStore>,
}

/// Replaces the built-in minimum price for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFloorOverride {
    pub category: ProductCategory,
    pub min_price: Decimal,
}

/// A retailer appended to the resolver table, after the built-in entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraStore {
    /// Case-insensitive label pattern, matched on word boundaries.
    pub pattern: String,
    pub id: String,
    pub name: String,
    /// Priority tier (1..=3). Absent means unranked.
    #[serde(default)]
    pub tier: Option<u8>,
    #[serde(default)]
    pub marketplace: bool,
}

/// Load and validate rule overrides from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rule_overrides(path: &Path) -> Result<RuleOverrides, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_rule_overrides(&content)
}

/// Parse and validate rule overrides from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_rule_overrides(content: &str) -> Result<RuleOverrides, ConfigError> {
    let overrides: RuleOverrides = serde_yaml::from_str(content)?;
    validate_overrides(&overrides)?;
    Ok(overrides)
}

fn validate_overrides(overrides: &RuleOverrides) -> Result<(), ConfigError> {
    let mut seen_categories = HashSet::new();
    for floor in &overrides.price_floors {
        if floor.min_price.is_sign_negative() {
            return Err(ConfigError::Validation(format!(
                "price floor for '{}' must not be negative (got {})",
                floor.category, floor.min_price
            )));
        }
        if !seen_categories.insert(floor.category) {
            return Err(ConfigError::Validation(format!(
                "duplicate price floor for '{}'",
                floor.category
            )));
        }
    }

    for id in &overrides.marketplace_stores {
        if id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "marketplace store id must be non-empty".to_string(),
            ));
        }
    }

    let mut seen_ids = HashSet::new();
    for store in &overrides.extra_stores {
        if store.pattern.trim().is_empty() || store.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "extra store '{}' needs a non-empty pattern and id",
                store.name
            )));
        }
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "extra store '{}' needs a display name",
                store.id
            )));
        }
        if let Some(tier) = store.tier {
            if ![1, 2, 3].contains(&tier) {
                return Err(ConfigError::Validation(format!(
                    "extra store '{}' has invalid tier {tier}; must be 1, 2, or 3",
                    store.id
                )));
            }
        }
        if !seen_ids.insert(store.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate extra store id: '{}'",
                store.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;

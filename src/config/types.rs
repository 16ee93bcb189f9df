//! Configuration types for the cost engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculation::TrainingPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::AllowanceType;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of the deployment.
    pub name: String,
    /// The version of the reference data.
    pub version: String,
    /// Label appended to formatted amounts (e.g., "ريال").
    #[serde(default)]
    pub currency_label: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "HR Cost Engine".to_string(),
            version: "default".to_string(),
            currency_label: String::new(),
        }
    }
}

/// Settings file structure (`settings.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Deployment metadata.
    pub metadata: EngineMetadata,
    /// Training cost provision policy.
    #[serde(default)]
    pub training_policy: TrainingPolicy,
}

/// Allowance type catalog file structure (`allowance_types.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct AllowanceTypesConfig {
    /// The catalog entries, in display order.
    pub allowance_types: Vec<AllowanceType>,
}

/// The complete engine configuration.
///
/// Reference data is loaded once and passed by reference to whatever needs
/// it; nothing in the crate keeps a global copy.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    training_policy: TrainingPolicy,
    /// Catalog in display order.
    allowance_types: Vec<AllowanceType>,
    /// Code to position in `allowance_types`.
    index: HashMap<String, usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            metadata: EngineMetadata::default(),
            training_policy: TrainingPolicy::default(),
            allowance_types: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// Returns `ConfigParseError` if two catalog entries share a code.
    pub fn new(
        metadata: EngineMetadata,
        training_policy: TrainingPolicy,
        allowance_types: Vec<AllowanceType>,
    ) -> EngineResult<Self> {
        let mut index = HashMap::with_capacity(allowance_types.len());
        for (position, allowance_type) in allowance_types.iter().enumerate() {
            if index.insert(allowance_type.code.clone(), position).is_some() {
                return Err(EngineError::ConfigParseError {
                    path: "allowance_types".to_string(),
                    message: format!("duplicate allowance type code '{}'", allowance_type.code),
                });
            }
        }

        Ok(Self {
            metadata,
            training_policy,
            allowance_types,
            index,
        })
    }

    /// Returns the deployment metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the training cost policy.
    pub fn training_policy(&self) -> &TrainingPolicy {
        &self.training_policy
    }

    /// Returns the whole catalog, in display order.
    pub fn allowance_types(&self) -> &[AllowanceType] {
        &self.allowance_types
    }

    /// Returns the active catalog entries, in display order.
    pub fn active_allowance_types(&self) -> impl Iterator<Item = &AllowanceType> {
        self.allowance_types.iter().filter(|t| t.is_active)
    }

    /// Gets an allowance type by its code.
    pub fn allowance_type(&self, code: &str) -> EngineResult<&AllowanceType> {
        self.index
            .get(code)
            .and_then(|&position| self.allowance_types.get(position))
            .ok_or_else(|| EngineError::AllowanceTypeNotFound {
                code: code.to_string(),
            })
    }

    /// Finds an allowance type by code, English name or Arabic name.
    pub fn find_allowance_type(&self, name: &str) -> Option<&AllowanceType> {
        self.allowance_types.iter().find(|t| t.matches_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn create_type(code: &str, name: &str, name_arabic: &str) -> AllowanceType {
        AllowanceType {
            code: code.to_string(),
            name: name.to_string(),
            name_arabic: name_arabic.to_string(),
            frequency: Frequency::Monthly,
            custom_months: None,
            is_active: true,
        }
    }

    #[test]
    fn test_lookup_by_code() {
        let config = EngineConfig::new(
            EngineMetadata::default(),
            TrainingPolicy::default(),
            vec![create_type("housing_allowance", "Housing Allowance", "بدل سكن")],
        )
        .unwrap();

        assert_eq!(config.allowance_type("housing_allowance").unwrap().name, "Housing Allowance");
        assert!(matches!(
            config.allowance_type("missing"),
            Err(EngineError::AllowanceTypeNotFound { code }) if code == "missing"
        ));
    }

    #[test]
    fn test_lookup_by_display_name() {
        let config = EngineConfig::new(
            EngineMetadata::default(),
            TrainingPolicy::default(),
            vec![create_type("housing_allowance", "Housing Allowance", "بدل سكن")],
        )
        .unwrap();

        assert!(config.find_allowance_type("بدل سكن").is_some());
        assert!(config.find_allowance_type("housing allowance").is_some());
        assert!(config.find_allowance_type("Food Allowance").is_none());
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let result = EngineConfig::new(
            EngineMetadata::default(),
            TrainingPolicy::default(),
            vec![
                create_type("food_allowance", "Food Allowance", "بدل طعام"),
                create_type("food_allowance", "Meals", "وجبات"),
            ],
        );

        match result {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("food_allowance"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_inactive_types_hidden_from_active_iterator() {
        let mut retired = create_type("phone_allowance", "Phone Allowance", "بدل هاتف");
        retired.is_active = false;
        let config = EngineConfig::new(
            EngineMetadata::default(),
            TrainingPolicy::default(),
            vec![create_type("food_allowance", "Food Allowance", "بدل طعام"), retired],
        )
        .unwrap();

        assert_eq!(config.allowance_types().len(), 2);
        assert_eq!(config.active_allowance_types().count(), 1);
        assert!(config.allowance_type("phone_allowance").is_ok());
    }
}

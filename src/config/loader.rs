//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine's
//! reference data from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::TrainingPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::AllowanceType;

use super::types::{AllowanceTypesConfig, EngineConfig, EngineMetadata, Settings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml         # Metadata and training cost policy
/// └── allowance_types.yaml  # Allowance type catalog
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_cost_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let housing = loader.allowance_type("housing_allowance").unwrap();
/// println!("{} is paid {}", housing.name, housing.frequency);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or the catalog repeats a code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hr_cost_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), hr_cost_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;

        let catalog_path = path.join("allowance_types.yaml");
        let catalog = Self::load_yaml::<AllowanceTypesConfig>(&catalog_path)?;

        let config = EngineConfig::new(
            settings.metadata,
            settings.training_policy,
            catalog.allowance_types,
        )
        .map_err(|e| match e {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: catalog_path.display().to_string(),
                message,
            },
            other => other,
        })?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the engine configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Returns the deployment metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the training cost policy.
    pub fn training_policy(&self) -> &TrainingPolicy {
        self.config.training_policy()
    }

    /// Gets an allowance type by its code.
    ///
    /// Returns `AllowanceTypeNotFound` for unknown codes.
    pub fn allowance_type(&self, code: &str) -> EngineResult<&AllowanceType> {
        self.config.allowance_type(code)
    }
}

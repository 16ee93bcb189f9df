//! Configuration loading and management for the HR Cost Engine.
//!
//! This module loads the seeded reference data from YAML files: deployment
//! metadata, the training cost policy and the allowance type catalog.
//!
//! # Example
//!
//! ```no_run
//! use hr_cost_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllowanceTypesConfig, EngineConfig, EngineMetadata, Settings};

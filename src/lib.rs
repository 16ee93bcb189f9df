//! HR cost engine.
//!
//! Computes what employees cost: allowances prorated to monthly and annual
//! equivalents, monthly gross salary, annual total cost and cost factor,
//! training provisions, end-of-service benefits and family ticket costs.
//! Around that core the crate loads reference data from YAML, imports
//! employee rows from decoded spreadsheets, builds per-employee and
//! workforce reports, and serves them over HTTP.
//!
//! # Example
//!
//! ```
//! use hr_cost_engine::calculation::{annual_equivalent, monthly_equivalent};
//! use hr_cost_engine::models::Frequency;
//! use rust_decimal::Decimal;
//!
//! let amount = Decimal::new(600, 0);
//! assert_eq!(monthly_equivalent(amount, Frequency::Custom, Some(6)), Decimal::new(100, 0));
//! assert_eq!(annual_equivalent(amount, Frequency::Custom, Some(6)), Decimal::new(1200, 0));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;

//! Error types for the HR cost engine.
//!
//! The calculation functions themselves never fail; these errors cover the
//! layers around them: configuration loading, record validation and
//! spreadsheet row import.

use thiserror::Error;

/// The main error type for the HR cost engine.
///
/// # Example
///
/// ```
/// use hr_cost_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An allowance referenced a type code missing from the catalog.
    #[error("Allowance type not found: {code}")]
    AllowanceTypeNotFound {
        /// The allowance type code that was not found.
        code: String,
    },

    /// An employee already holds an allowance of the given type.
    #[error("Employee '{employee_number}' already has an allowance of type '{allowance_type}'")]
    DuplicateAllowance {
        /// The employee number.
        employee_number: String,
        /// The allowance type code held twice.
        allowance_type: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A spreadsheet row could not be turned into an employee record.
    #[error("Row {row}: {message}")]
    InvalidImportRow {
        /// The 1-based sheet row number (the header row is row 1).
        row: usize,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Spreadsheet row import.
//!
//! Works on already-decoded sheet data: a header row of strings and rows
//! of [`CellValue`]s. Headers are resolved through a static mapping table,
//! cells are coerced with parse-or-default semantics, and allowance columns
//! become [`Allowance`](crate::models::Allowance) grants.
//!
//! # Example
//!
//! ```
//! use hr_cost_engine::config::EngineConfig;
//! use hr_cost_engine::import::{SheetData, import_sheet, template_headers};
//! use chrono::NaiveDate;
//!
//! let config = EngineConfig::default();
//! let sheet = SheetData {
//!     headers: template_headers(&config),
//!     rows: vec![],
//! };
//! let outcome = import_sheet(&sheet, &config, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
//! assert!(outcome.employees.is_empty());
//! assert!(outcome.ignored_columns.is_empty());
//! ```

mod coercion;
mod header_map;
mod rows;

pub use coercion::{CellValue, DATE_FORMATS, Parsed, parse_count, parse_date, parse_decimal, parse_label};
pub use header_map::{
    ALLOWANCE_KEYWORDS, ColumnKind, EmployeeField, HEADER_TABLE, REQUIRED_MARKER, classify_column,
    has_allowance_keyword, infer_frequency, infer_nature, lookup_field, normalize_header,
    template_headers,
};
pub use rows::{AllowanceFallback, FieldFallback, ImportOutcome, ImportRowError, ImportedRow, SheetData, import_sheet};

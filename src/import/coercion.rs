//! Parse-or-default coercion of sheet cells.
//!
//! Every coercion returns a [`Parsed`] value carrying whether the default
//! was substituted, so an imported zero can be told apart from a cell that
//! could not be read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value.
    Empty,
    /// A text cell.
    Text(String),
    /// A numeric cell.
    Number(Decimal),
    /// A date cell.
    Date(NaiveDate),
    /// A boolean cell.
    Bool(bool),
}

impl CellValue {
    /// Returns true for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Renders the cell as trimmed text.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.trim().to_string(),
            CellValue::Number(n) => n.normalize().to_string(),
            CellValue::Date(d) => d.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(Decimal::from(value))
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// A coerced value and whether the default was used in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parsed<T> {
    /// The coerced value, or the default.
    pub value: T,
    /// True if the cell was blank or unreadable.
    pub fallback_used: bool,
}

impl<T> Parsed<T> {
    /// A successfully read value.
    pub fn read(value: T) -> Self {
        Self {
            value,
            fallback_used: false,
        }
    }

    /// A default substituted for a blank or unreadable cell.
    pub fn fallback(value: T) -> Self {
        Self {
            value,
            fallback_used: true,
        }
    }
}

/// Date formats accepted in text cells, tried in order.
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Coerces a cell to a decimal, defaulting to zero.
///
/// Text may carry thousands separators ("12,500.50").
///
/// # Examples
///
/// ```
/// use hr_cost_engine::import::{CellValue, parse_decimal};
/// use rust_decimal::Decimal;
///
/// let parsed = parse_decimal(&CellValue::from("12,500"));
/// assert_eq!(parsed.value, Decimal::new(12_500, 0));
/// assert!(!parsed.fallback_used);
///
/// let parsed = parse_decimal(&CellValue::from("n/a"));
/// assert_eq!(parsed.value, Decimal::ZERO);
/// assert!(parsed.fallback_used);
/// ```
pub fn parse_decimal(cell: &CellValue) -> Parsed<Decimal> {
    match cell {
        CellValue::Number(n) => Parsed::read(*n),
        CellValue::Text(text) => {
            let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
            Decimal::from_str(&cleaned)
                .or_else(|_| Decimal::from_scientific(&cleaned))
                .map(Parsed::read)
                .unwrap_or_else(|_| Parsed::fallback(Decimal::ZERO))
        }
        _ => Parsed::fallback(Decimal::ZERO),
    }
}

/// Coerces a cell to a non-negative count, defaulting to zero.
///
/// Fractions are truncated; negative numbers fall back.
pub fn parse_count(cell: &CellValue) -> Parsed<u32> {
    let number = parse_decimal(cell);
    if number.fallback_used {
        return Parsed::fallback(0);
    }

    match number.value.trunc().to_u32() {
        Some(count) => Parsed::read(count),
        None => Parsed::fallback(0),
    }
}

/// Coerces a cell to a date, defaulting to `default`.
///
/// Text cells are tried against [`DATE_FORMATS`] in order.
pub fn parse_date(cell: &CellValue, default: NaiveDate) -> Parsed<NaiveDate> {
    match cell {
        CellValue::Date(date) => Parsed::read(*date),
        CellValue::Text(text) => {
            let text = text.trim();
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(Parsed::read)
                .unwrap_or_else(|| Parsed::fallback(default))
        }
        _ => Parsed::fallback(default),
    }
}

/// Coerces a cell through a label lookup, defaulting to `default`.
pub fn parse_label<T>(cell: &CellValue, default: T, lookup: impl Fn(&str) -> Option<T>) -> Parsed<T> {
    if cell.is_blank() {
        return Parsed::fallback(default);
    }
    match lookup(&cell.as_text()) {
        Some(value) => Parsed::read(value),
        None => Parsed::fallback(default),
    }
}

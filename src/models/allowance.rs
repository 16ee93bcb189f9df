//! Allowance type and allowance grant models.
//!
//! An [`AllowanceType`] is a named benefit category with a payout frequency.
//! An [`Allowance`] grants one type to one employee for a given amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The payout cycle of an allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Paid every month.
    Monthly,
    /// Paid once a year.
    Annual,
    /// Paid once every two years.
    Biennial,
    /// Paid once every `custom_months` months.
    Custom,
    /// Paid once; never recurs.
    OneTime,
}

impl Frequency {
    /// Returns the snake_case identifier used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Annual => "annual",
            Frequency::Biennial => "biennial",
            Frequency::Custom => "custom",
            Frequency::OneTime => "one_time",
        }
    }

    /// Returns the Arabic display label.
    pub fn label_ar(&self) -> &'static str {
        match self {
            Frequency::Monthly => "شهري",
            Frequency::Annual => "سنوي",
            Frequency::Biennial => "كل سنتين",
            Frequency::Custom => "مخصص",
            Frequency::OneTime => "مرة واحدة",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an allowance is paid in cash or provided in kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceNature {
    /// Paid in cash; counts toward the end-of-service salary base.
    #[default]
    Cash,
    /// Provided as a benefit (housing, meals, insurance).
    InKind,
}

impl AllowanceNature {
    /// Returns the Arabic display label.
    pub fn label_ar(&self) -> &'static str {
        match self {
            AllowanceNature::Cash => "نقدي",
            AllowanceNature::InKind => "عيني",
        }
    }
}

fn default_true() -> bool {
    true
}

/// A benefit category shared by many allowance grants.
///
/// # Example
///
/// ```
/// use hr_cost_engine::models::{AllowanceType, Frequency};
///
/// let housing = AllowanceType {
///     code: "housing_allowance".to_string(),
///     name: "Housing Allowance".to_string(),
///     name_arabic: "بدل السكن".to_string(),
///     frequency: Frequency::Monthly,
///     custom_months: None,
///     is_active: true,
/// };
/// assert!(housing.matches_name("HOUSING ALLOWANCE"));
/// assert!(housing.matches_name("بدل السكن"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceType {
    /// Stable identifier (e.g., "housing_allowance").
    pub code: String,
    /// English display name.
    pub name: String,
    /// Arabic display name.
    pub name_arabic: String,
    /// The payout cycle.
    pub frequency: Frequency,
    /// Cycle length in months, only meaningful for [`Frequency::Custom`].
    #[serde(default)]
    pub custom_months: Option<u32>,
    /// Inactive types are kept for history but hidden from templates.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl AllowanceType {
    /// Returns true if `name` equals the code, English or Arabic name.
    ///
    /// Comparison trims whitespace and ignores Latin case.
    pub fn matches_name(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        [&self.code, &self.name, &self.name_arabic]
            .iter()
            .any(|candidate| candidate.trim().to_lowercase() == wanted)
    }

    /// Creates an active allowance of this type.
    pub fn grant(&self, amount: Decimal, nature: AllowanceNature) -> Allowance {
        Allowance {
            allowance_type: self.code.clone(),
            frequency: self.frequency,
            custom_months: self.custom_months,
            amount,
            nature,
            notes: String::new(),
            is_active: true,
        }
    }
}

/// A concrete benefit grant to one employee.
///
/// Carries a copy of its type's frequency so the calculation engine
/// never needs the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// The [`AllowanceType::code`] this grant belongs to.
    pub allowance_type: String,
    /// The payout cycle copied from the type.
    pub frequency: Frequency,
    /// The custom cycle length copied from the type.
    #[serde(default)]
    pub custom_months: Option<u32>,
    /// Amount paid per cycle.
    pub amount: Decimal,
    /// Cash or in-kind.
    #[serde(default)]
    pub nature: AllowanceNature,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Inactive grants are ignored by every calculation.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Allowance {
    /// Returns true if the allowance is paid in cash.
    pub fn is_cash(&self) -> bool {
        self.nature == AllowanceNature::Cash
    }
}

//! Employee model and related types.
//!
//! This module defines the Employee struct together with the category,
//! insurance tier and ticket policy enums used by cost calculations.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Allowance;

/// Money fields must stay below this bound (ten digits, two of them decimal).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Upper bound for each of `num_wives` and `num_children`.
pub const MAX_DEPENDANTS: u32 = 99;

fn check_amount(field: impl Into<String>, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidEmployee {
            field: field.into(),
            message: format!("must not be negative (got {})", value),
        });
    }
    if value >= MAX_AMOUNT {
        return Err(EngineError::InvalidEmployee {
            field: field.into(),
            message: format!("must be below {} (got {})", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

/// The workforce category an employee belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeCategory {
    /// Manual labor.
    Labor,
    /// Office staff.
    Staff,
    /// Administrative management.
    Manager,
    /// Engineers.
    Engineer,
    /// Technicians.
    Technician,
}

impl EmployeeCategory {
    /// All categories in display order.
    pub const ALL: [EmployeeCategory; 5] = [
        EmployeeCategory::Labor,
        EmployeeCategory::Staff,
        EmployeeCategory::Manager,
        EmployeeCategory::Engineer,
        EmployeeCategory::Technician,
    ];

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeCategory::Labor => "labor",
            EmployeeCategory::Staff => "staff",
            EmployeeCategory::Manager => "manager",
            EmployeeCategory::Engineer => "engineer",
            EmployeeCategory::Technician => "technician",
        }
    }

    /// Returns the Arabic display label.
    pub fn label_ar(&self) -> &'static str {
        match self {
            EmployeeCategory::Labor => "عمالة",
            EmployeeCategory::Staff => "موظفين",
            EmployeeCategory::Manager => "إداري",
            EmployeeCategory::Engineer => "مهندس",
            EmployeeCategory::Technician => "فني",
        }
    }

    /// Resolves a category from its identifier or Arabic label.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_cost_engine::models::EmployeeCategory;
    ///
    /// assert_eq!(EmployeeCategory::from_label("مهندس"), Some(EmployeeCategory::Engineer));
    /// assert_eq!(EmployeeCategory::from_label("STAFF"), Some(EmployeeCategory::Staff));
    /// assert_eq!(EmployeeCategory::from_label("pilot"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|category| {
            category.as_str().eq_ignore_ascii_case(label) || category.label_ar() == label
        })
    }
}

/// The medical insurance tier of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceType {
    /// Basic coverage.
    #[default]
    Basic,
    /// Comprehensive coverage.
    Comprehensive,
    /// Premium coverage.
    Premium,
}

impl InsuranceType {
    /// Resolves an insurance tier from its identifier or Arabic label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "أساسي" => Some(InsuranceType::Basic),
            "شامل" => Some(InsuranceType::Comprehensive),
            "ممتاز" => Some(InsuranceType::Premium),
            other => match other.to_ascii_lowercase().as_str() {
                "basic" => Some(InsuranceType::Basic),
                "comprehensive" => Some(InsuranceType::Comprehensive),
                "premium" => Some(InsuranceType::Premium),
                _ => None,
            },
        }
    }
}

/// How often the employer pays for the family's travel tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    /// Tickets every year.
    #[default]
    Annual,
    /// Tickets every two years.
    Biennial,
}

impl TicketType {
    /// Resolves a ticket type from its identifier or Arabic label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "سنوي" => Some(TicketType::Annual),
            "كل سنتين" => Some(TicketType::Biennial),
            other => match other.to_ascii_lowercase().as_str() {
                "annual" => Some(TicketType::Annual),
                "biennial" => Some(TicketType::Biennial),
                _ => None,
            },
        }
    }
}

fn default_true() -> bool {
    true
}

/// An employee record with its allowance grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee number (e.g., "EMP001").
    pub employee_number: String,
    /// Full name.
    pub name: String,
    /// Nationality as recorded (free text, e.g., "سعودي").
    pub nationality: String,
    /// National id or residence permit number.
    #[serde(default)]
    pub id_number: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Workforce category.
    pub category: EmployeeCategory,
    /// Latest monthly basic salary.
    pub basic_salary: Decimal,
    /// Medical insurance tier.
    #[serde(default)]
    pub insurance_type: InsuranceType,
    /// Number of wives.
    #[serde(default)]
    pub num_wives: u32,
    /// Number of children.
    #[serde(default)]
    pub num_children: u32,
    /// One-time recruitment cost.
    #[serde(default)]
    pub recruitment_cost: Decimal,
    /// One-time training cost.
    #[serde(default)]
    pub training_cost: Decimal,
    /// Family ticket cycle.
    #[serde(default)]
    pub ticket_type: TicketType,
    /// Family ticket cost as recorded on the employee file.
    #[serde(default)]
    pub family_ticket_cost: Decimal,
    /// Inactive employees are logically deleted.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Allowance grants, at most one per allowance type.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}

impl Employee {
    /// Returns the active allowance grants.
    pub fn active_allowances(&self) -> impl Iterator<Item = &Allowance> {
        self.allowances.iter().filter(|a| a.is_active)
    }

    /// Returns the number of dependants covered by family tickets.
    pub fn family_members(&self) -> u32 {
        self.num_wives.saturating_add(self.num_children)
    }

    /// Adds an allowance, rejecting a second grant of the same type.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_cost_engine::models::{Allowance, AllowanceNature, Employee, EmployeeCategory, Frequency};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     employee_number: "EMP001".to_string(),
    ///     name: "Ahmed".to_string(),
    ///     nationality: "سعودي".to_string(),
    ///     id_number: String::new(),
    ///     hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
    ///     category: EmployeeCategory::Staff,
    ///     basic_salary: Decimal::new(8000, 0),
    ///     insurance_type: Default::default(),
    ///     num_wives: 0,
    ///     num_children: 0,
    ///     recruitment_cost: Decimal::ZERO,
    ///     training_cost: Decimal::ZERO,
    ///     ticket_type: Default::default(),
    ///     family_ticket_cost: Decimal::ZERO,
    ///     is_active: true,
    ///     allowances: vec![],
    /// };
    /// let housing = Allowance {
    ///     allowance_type: "housing_allowance".to_string(),
    ///     frequency: Frequency::Monthly,
    ///     custom_months: None,
    ///     amount: Decimal::new(1500, 0),
    ///     nature: AllowanceNature::Cash,
    ///     notes: String::new(),
    ///     is_active: true,
    /// };
    ///
    /// assert!(employee.add_allowance(housing.clone()).is_ok());
    /// assert!(employee.add_allowance(housing).is_err());
    /// ```
    pub fn add_allowance(&mut self, allowance: Allowance) -> EngineResult<()> {
        if self.has_allowance_type(&allowance.allowance_type) {
            return Err(EngineError::DuplicateAllowance {
                employee_number: self.employee_number.clone(),
                allowance_type: allowance.allowance_type,
            });
        }
        self.allowances.push(allowance);
        Ok(())
    }

    /// Adds an allowance or replaces the existing grant of the same type.
    ///
    /// Returns true if an existing grant was replaced.
    pub fn upsert_allowance(&mut self, allowance: Allowance) -> bool {
        match self
            .allowances
            .iter_mut()
            .find(|a| a.allowance_type == allowance.allowance_type)
        {
            Some(existing) => {
                *existing = allowance;
                true
            }
            None => {
                self.allowances.push(allowance);
                false
            }
        }
    }

    /// Returns true if the employee holds a grant of the given type.
    pub fn has_allowance_type(&self, code: &str) -> bool {
        self.allowances.iter().any(|a| a.allowance_type == code)
    }

    /// Checks the record for values no form or import should accept.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_number.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "employee_number".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let money_fields = [
            ("basic_salary", self.basic_salary),
            ("recruitment_cost", self.recruitment_cost),
            ("training_cost", self.training_cost),
            ("family_ticket_cost", self.family_ticket_cost),
        ];
        for (field, value) in money_fields {
            check_amount(field, value)?;
        }

        for (field, count) in [("num_wives", self.num_wives), ("num_children", self.num_children)] {
            if count > MAX_DEPENDANTS {
                return Err(EngineError::InvalidEmployee {
                    field: field.to_string(),
                    message: format!("must be at most {} (got {})", MAX_DEPENDANTS, count),
                });
            }
        }

        let mut seen = HashSet::new();
        for allowance in &self.allowances {
            if !seen.insert(allowance.allowance_type.as_str()) {
                return Err(EngineError::DuplicateAllowance {
                    employee_number: self.employee_number.clone(),
                    allowance_type: allowance.allowance_type.clone(),
                });
            }
            check_amount(format!("allowances.{}.amount", allowance.allowance_type), allowance.amount)?;
        }

        Ok(())
    }
}

//! Employee selection for aggregated reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, EmployeeCategory};

/// Criteria selecting the employees an aggregated report covers.
///
/// Every criterion left as `None` matches everything, except `is_active`:
/// when unset only active employees are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFilter {
    /// Case-insensitive substring of the employee number or name.
    pub search: Option<String>,
    /// Exact nationality (trimmed).
    pub nationality: Option<String>,
    /// Workforce category.
    pub category: Option<EmployeeCategory>,
    /// Earliest hire date, inclusive.
    pub hire_date_from: Option<NaiveDate>,
    /// Latest hire date, inclusive.
    pub hire_date_to: Option<NaiveDate>,
    /// Active flag; unset selects active employees only.
    pub is_active: Option<bool>,
    /// Minimum basic salary, inclusive.
    pub salary_min: Option<Decimal>,
    /// Maximum basic salary, inclusive.
    pub salary_max: Option<Decimal>,
}

impl ReportFilter {
    /// Returns true if the employee satisfies every criterion.
    pub fn matches(&self, employee: &Employee) -> bool {
        if employee.is_active != self.is_active.unwrap_or(true) {
            return false;
        }

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let search = search.to_lowercase();
            if !employee.employee_number.to_lowercase().contains(&search)
                && !employee.name.to_lowercase().contains(&search)
            {
                return false;
            }
        }

        if let Some(nationality) = self.nationality.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if employee.nationality.trim() != nationality {
                return false;
            }
        }

        if self.category.is_some_and(|c| c != employee.category) {
            return false;
        }
        if self.hire_date_from.is_some_and(|from| employee.hire_date < from) {
            return false;
        }
        if self.hire_date_to.is_some_and(|to| employee.hire_date > to) {
            return false;
        }
        if self.salary_min.is_some_and(|min| employee.basic_salary < min) {
            return false;
        }
        if self.salary_max.is_some_and(|max| employee.basic_salary > max) {
            return false;
        }

        true
    }

    /// Selects the matching employees, preserving order.
    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(number: &str, name: &str, nationality: &str, salary: &str) -> Employee {
        Employee {
            employee_number: number.to_string(),
            name: name.to_string(),
            nationality: nationality.to_string(),
            id_number: String::new(),
            hire_date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            category: EmployeeCategory::Staff,
            basic_salary: dec(salary),
            insurance_type: Default::default(),
            num_wives: 0,
            num_children: 0,
            recruitment_cost: Decimal::ZERO,
            training_cost: Decimal::ZERO,
            ticket_type: Default::default(),
            family_ticket_cost: Decimal::ZERO,
            is_active: true,
            allowances: vec![],
        }
    }

    fn create_workforce() -> Vec<Employee> {
        let mut inactive = create_test_employee("EMP004", "Retired", "سعودي", "9000");
        inactive.is_active = false;
        let mut engineer = create_test_employee("EMP003", "Omar Engineer", "مصري", "12000");
        engineer.category = EmployeeCategory::Engineer;
        engineer.hire_date = NaiveDate::from_ymd_opt(2015, 3, 10).unwrap();
        vec![
            create_test_employee("EMP001", "Ahmed Ali", "سعودي", "5000"),
            create_test_employee("EMP002", "Sara Khan", "هندي", "1800"),
            engineer,
            inactive,
        ]
    }

    fn numbers(selected: Vec<&Employee>) -> Vec<&str> {
        selected.into_iter().map(|e| e.employee_number.as_str()).collect()
    }

    #[test]
    fn test_default_filter_selects_active_only() {
        let workforce = create_workforce();
        assert_eq!(numbers(ReportFilter::default().apply(&workforce)), vec!["EMP001", "EMP002", "EMP003"]);
    }

    #[test]
    fn test_inactive_filter() {
        let workforce = create_workforce();
        let filter = ReportFilter {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(numbers(filter.apply(&workforce)), vec!["EMP004"]);
    }

    #[test]
    fn test_search_matches_number_or_name() {
        let workforce = create_workforce();
        let by_name = ReportFilter {
            search: Some("khan".to_string()),
            ..Default::default()
        };
        let by_number = ReportFilter {
            search: Some("emp00".to_string()),
            ..Default::default()
        };
        assert_eq!(numbers(by_name.apply(&workforce)), vec!["EMP002"]);
        assert_eq!(by_number.apply(&workforce).len(), 3);
    }

    #[test]
    fn test_nationality_and_category() {
        let workforce = create_workforce();
        let filter = ReportFilter {
            nationality: Some("سعودي".to_string()),
            ..Default::default()
        };
        assert_eq!(numbers(filter.apply(&workforce)), vec!["EMP001"]);

        let filter = ReportFilter {
            category: Some(EmployeeCategory::Engineer),
            ..Default::default()
        };
        assert_eq!(numbers(filter.apply(&workforce)), vec!["EMP003"]);
    }

    #[test]
    fn test_hire_date_range_is_inclusive() {
        let workforce = create_workforce();
        let filter = ReportFilter {
            hire_date_from: NaiveDate::from_ymd_opt(2015, 3, 10),
            hire_date_to: NaiveDate::from_ymd_opt(2020, 1, 1),
            ..Default::default()
        };
        assert_eq!(numbers(filter.apply(&workforce)), vec!["EMP003"]);
    }

    #[test]
    fn test_salary_range_is_inclusive() {
        let workforce = create_workforce();
        let filter = ReportFilter {
            salary_min: Some(dec("1800")),
            salary_max: Some(dec("5000")),
            ..Default::default()
        };
        assert_eq!(numbers(filter.apply(&workforce)), vec!["EMP001", "EMP002"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let workforce = create_workforce();
        let filter = ReportFilter {
            search: Some("   ".to_string()),
            nationality: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&workforce).len(), 3);
    }

    #[test]
    fn test_filter_deserializes_from_partial_json() {
        let filter: ReportFilter = serde_json::from_str(r#"{"category":"engineer","salary_min":"1000"}"#).unwrap();
        assert_eq!(filter.category, Some(EmployeeCategory::Engineer));
        assert_eq!(filter.salary_min, Some(dec("1000")));
        assert_eq!(filter.is_active, None);
    }
}

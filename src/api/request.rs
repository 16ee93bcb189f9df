//! Request types for the HR cost engine API.
//!
//! Allowances in requests reference catalog codes; the frequency of each
//! grant is copied from the catalog when the request is converted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{AllowanceNature, Employee, EmployeeCategory, InsuranceType, TicketType};
use crate::reports::ReportFilter;

fn default_true() -> bool {
    true
}

/// Request body for the `/cost-report` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReportRequest {
    /// The employee to report on.
    pub employee: EmployeeRequest,
    /// Date to count service to; today when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for the `/workforce-summary` and `/comparison` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkforceRequest {
    /// The workforce to select from.
    pub employees: Vec<EmployeeRequest>,
    /// Selection criteria; active employees only when omitted.
    #[serde(default)]
    pub filter: ReportFilter,
    /// Date to count service to; today when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Employee information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique employee number.
    pub employee_number: String,
    /// Full name.
    pub name: String,
    /// Nationality as recorded.
    pub nationality: String,
    /// National id or residence permit number.
    #[serde(default)]
    pub id_number: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Workforce category.
    pub category: EmployeeCategory,
    /// Monthly basic salary.
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
    /// Family ticket cost as recorded.
    #[serde(default)]
    pub family_ticket_cost: Decimal,
    /// Active flag.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Allowance grants by catalog code.
    #[serde(default)]
    pub allowances: Vec<AllowanceRequest>,
}

/// An allowance grant in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceRequest {
    /// Catalog code of the allowance type.
    pub allowance_type: String,
    /// Amount per cycle.
    pub amount: Decimal,
    /// Cash or in kind.
    #[serde(default)]
    pub nature: AllowanceNature,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Active flag.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl EmployeeRequest {
    /// Resolves allowance codes against the catalog and validates the record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::AllowanceTypeNotFound`] for an
    /// unknown code, [`crate::error::EngineError::DuplicateAllowance`] when a
    /// type is granted twice, and
    /// [`crate::error::EngineError::InvalidEmployee`] for invalid values.
    pub fn into_employee(self, config: &EngineConfig) -> EngineResult<Employee> {
        let mut employee = Employee {
            employee_number: self.employee_number,
            name: self.name,
            nationality: self.nationality,
            id_number: self.id_number,
            hire_date: self.hire_date,
            category: self.category,
            basic_salary: self.basic_salary,
            insurance_type: self.insurance_type,
            num_wives: self.num_wives,
            num_children: self.num_children,
            recruitment_cost: self.recruitment_cost,
            training_cost: self.training_cost,
            ticket_type: self.ticket_type,
            family_ticket_cost: self.family_ticket_cost,
            is_active: self.is_active,
            allowances: Vec::with_capacity(self.allowances.len()),
        };

        for request in self.allowances {
            let mut allowance = config
                .allowance_type(&request.allowance_type)?
                .grant(request.amount, request.nature);
            allowance.notes = request.notes;
            allowance.is_active = request.is_active;
            employee.add_allowance(allowance)?;
        }

        employee.validate()?;
        Ok(employee)
    }
}

impl WorkforceRequest {
    /// Converts every employee, stopping at the first invalid one.
    pub fn into_parts(self, config: &EngineConfig) -> EngineResult<(Vec<Employee>, ReportFilter, Option<NaiveDate>)> {
        let employees = self
            .employees
            .into_iter()
            .map(|e| e.into_employee(config))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok((employees, self.filter, self.as_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::TrainingPolicy;
    use crate::config::EngineMetadata;
    use crate::error::EngineError;
    use crate::models::{AllowanceType, Frequency};

    fn create_test_config() -> EngineConfig {
        let housing = AllowanceType {
            code: "housing_allowance".to_string(),
            name: "Housing Allowance".to_string(),
            name_arabic: "بدل السكن".to_string(),
            frequency: Frequency::Monthly,
            custom_months: None,
            is_active: true,
        };
        EngineConfig::new(EngineMetadata::default(), TrainingPolicy::default(), vec![housing]).unwrap()
    }

    fn parse_employee(json: &str) -> EmployeeRequest {
        serde_json::from_str(json).unwrap()
    }

    const MINIMAL: &str = r#"{
        "employee_number": "EMP001",
        "name": "Ahmed",
        "nationality": "سعودي",
        "hire_date": "2020-01-15",
        "category": "staff",
        "basic_salary": "8000",
        "allowances": [{"allowance_type": "housing_allowance", "amount": "2000"}]
    }"#;

    #[test]
    fn test_request_defaults() {
        let request = parse_employee(MINIMAL);
        assert!(request.is_active);
        assert_eq!(request.ticket_type, TicketType::Annual);
        assert!(request.allowances[0].is_active);
        assert_eq!(request.allowances[0].nature, AllowanceNature::Cash);
    }

    #[test]
    fn test_into_employee_copies_catalog_frequency() {
        let employee = parse_employee(MINIMAL).into_employee(&create_test_config()).unwrap();

        assert_eq!(employee.allowances.len(), 1);
        assert_eq!(employee.allowances[0].frequency, Frequency::Monthly);
        assert_eq!(employee.allowances[0].amount, Decimal::new(2000, 0));
    }

    #[test]
    fn test_unknown_allowance_code_is_rejected() {
        let mut request = parse_employee(MINIMAL);
        request.allowances[0].allowance_type = "yacht_allowance".to_string();

        let result = request.into_employee(&create_test_config());
        assert!(matches!(result, Err(EngineError::AllowanceTypeNotFound { code }) if code == "yacht_allowance"));
    }

    #[test]
    fn test_duplicate_allowance_is_rejected() {
        let mut request = parse_employee(MINIMAL);
        let duplicate = request.allowances[0].clone();
        request.allowances.push(duplicate);

        let result = request.into_employee(&create_test_config());
        assert!(matches!(result, Err(EngineError::DuplicateAllowance { .. })));
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let mut request = parse_employee(MINIMAL);
        request.basic_salary = Decimal::new(-1, 0);

        let result = request.into_employee(&create_test_config());
        assert!(matches!(result, Err(EngineError::InvalidEmployee { field, .. }) if field == "basic_salary"));
    }

    #[test]
    fn test_workforce_request_defaults() {
        let json = format!(r#"{{"employees": [{}]}}"#, MINIMAL);
        let request: WorkforceRequest = serde_json::from_str(&json).unwrap();

        let (employees, filter, as_of) = request.into_parts(&create_test_config()).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(filter, ReportFilter::default());
        assert_eq!(as_of, None);
    }
}

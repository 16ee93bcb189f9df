//! Per-employee cost report.

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{
    EndOfServiceBenefit, FamilyTicketCost, NationalityClass, SalaryTotals, annual_equivalent,
    calculate_end_of_service, calculate_family_ticket, calculate_salary_totals,
    calculate_training_cost, monthly_equivalent, years_of_service,
};
use crate::config::EngineConfig;
use crate::models::{AllowanceNature, AuditTrace, Employee, EmployeeCategory, Frequency};

use super::format::{format_currency, format_percent};

/// One allowance grant as it appears on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceLine {
    /// Allowance type code.
    pub allowance_type: String,
    /// English name from the catalog, or the code if the type is unknown.
    pub name: String,
    /// Arabic name from the catalog, or the code if the type is unknown.
    pub name_arabic: String,
    /// Payout cycle.
    pub frequency: Frequency,
    /// Custom cycle length, if any.
    pub custom_months: Option<u32>,
    /// Cash or in kind.
    pub nature: AllowanceNature,
    /// Amount per cycle.
    pub amount: Decimal,
    /// Monthly equivalent.
    pub monthly_equivalent: Decimal,
    /// Annual equivalent.
    pub annual_equivalent: Decimal,
}

/// One-time costs, shown apart from the annual total cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCosts {
    /// Recruitment cost.
    pub recruitment_cost: Decimal,
    /// Actual training cost.
    pub training_cost: Decimal,
    /// Sum of both.
    pub total: Decimal,
}

impl OneTimeCosts {
    /// Collects an employee's one-time costs.
    pub fn of(employee: &Employee) -> Self {
        Self {
            recruitment_cost: employee.recruitment_cost,
            training_cost: employee.training_cost,
            total: employee.recruitment_cost + employee.training_cost,
        }
    }

    /// Adds another employee's one-time costs to this one.
    pub fn accumulate(&mut self, other: &OneTimeCosts) {
        self.recruitment_cost += other.recruitment_cost;
        self.training_cost += other.training_cost;
        self.total += other.total;
    }
}

/// The training provision as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProvision {
    /// Nationality class applied.
    pub nationality_class: NationalityClass,
    /// Rate applied.
    pub rate: Decimal,
    /// Monthly provision.
    pub monthly_amount: Decimal,
    /// Monthly provision x 12.
    pub annual_amount: Decimal,
}

/// Headline figures formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFigures {
    /// Monthly gross salary.
    pub monthly_gross_salary: String,
    /// Annual total cost.
    pub annual_total_cost: String,
    /// Total employer cost.
    pub total_employer_cost: String,
    /// Efficiency ratio as a percentage.
    pub efficiency: String,
}

/// The full cost report of one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCostReport {
    /// Unique report id.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// The date years of service are counted to.
    pub as_of: NaiveDate,
    /// Employee number.
    pub employee_number: String,
    /// Employee name.
    pub name: String,
    /// Nationality as recorded.
    pub nationality: String,
    /// Workforce category.
    pub category: EmployeeCategory,
    /// Arabic category label.
    pub category_label: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Whole years of service at `as_of`.
    pub years_of_service: u32,
    /// Active allowance grants.
    pub allowances: Vec<AllowanceLine>,
    /// Salary and cost totals.
    pub totals: SalaryTotals,
    /// One-time costs, excluded from `totals.annual_total_cost`.
    pub one_time_costs: OneTimeCosts,
    /// Training provision.
    pub training_provision: TrainingProvision,
    /// End-of-service benefit accrued at `as_of`.
    pub end_of_service: EndOfServiceBenefit,
    /// Family ticket cost.
    pub family_ticket: FamilyTicketCost,
    /// Annual total cost plus one-time costs, the annual training provision
    /// and the annual family ticket cost.
    pub total_employer_cost: Decimal,
    /// Headline figures with the configured currency label.
    pub display: DisplayFigures,
    /// Every calculation step behind the figures.
    pub audit_trace: AuditTrace,
}

/// Builds the allowance lines for an employee's active grants.
pub fn allowance_lines(employee: &Employee, config: &EngineConfig) -> Vec<AllowanceLine> {
    employee
        .active_allowances()
        .map(|allowance| {
            let (name, name_arabic) = match config.allowance_type(&allowance.allowance_type) {
                Ok(t) => (t.name.clone(), t.name_arabic.clone()),
                Err(_) => (allowance.allowance_type.clone(), allowance.allowance_type.clone()),
            };
            AllowanceLine {
                allowance_type: allowance.allowance_type.clone(),
                name,
                name_arabic,
                frequency: allowance.frequency,
                custom_months: allowance.custom_months,
                nature: allowance.nature,
                amount: allowance.amount,
                monthly_equivalent: monthly_equivalent(allowance.amount, allowance.frequency, allowance.custom_months),
                annual_equivalent: annual_equivalent(allowance.amount, allowance.frequency, allowance.custom_months),
            }
        })
        .collect()
}

/// Produces the cost report of one employee.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::config::EngineConfig;
/// use hr_cost_engine::models::{Employee, EmployeeCategory};
/// use hr_cost_engine::reports::build_cost_report;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     employee_number: "EMP001".to_string(),
///     name: "Ahmed".to_string(),
///     nationality: "سعودي".to_string(),
///     id_number: String::new(),
///     hire_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     category: EmployeeCategory::Staff,
///     basic_salary: Decimal::new(10_000, 0),
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
/// let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let report = build_cost_report(&employee, &EngineConfig::default(), as_of);
///
/// assert_eq!(report.totals.annual_total_cost, Decimal::new(120_000, 0));
/// assert_eq!(report.training_provision.monthly_amount, Decimal::new(500, 0));
/// assert_eq!(report.years_of_service, 7);
/// ```
pub fn build_cost_report(employee: &Employee, config: &EngineConfig, as_of: NaiveDate) -> EmployeeCostReport {
    let start_time = Instant::now();
    let mut step_number: u32 = 1;

    let salary = calculate_salary_totals(employee, step_number);
    step_number += salary.audit_steps.len() as u32;
    let mut steps = salary.audit_steps;
    let warnings = salary.warnings;
    let totals = salary.totals;

    let training = calculate_training_cost(
        totals.monthly_gross_salary,
        &employee.nationality,
        config.training_policy(),
        step_number,
    );
    steps.push(training.audit_step);
    step_number += 1;

    let eos = calculate_end_of_service(employee, as_of, step_number);
    steps.push(eos.audit_step);
    step_number += 1;

    let ticket = calculate_family_ticket(employee, step_number);
    steps.push(ticket.audit_step);

    let one_time_costs = OneTimeCosts::of(employee);
    let total_employer_cost =
        totals.annual_total_cost + one_time_costs.total + training.annual_amount + ticket.cost.annual_cost;

    let currency = &config.metadata().currency_label;
    let display = DisplayFigures {
        monthly_gross_salary: format_currency(totals.monthly_gross_salary, currency),
        annual_total_cost: format_currency(totals.annual_total_cost, currency),
        total_employer_cost: format_currency(total_employer_cost, currency),
        efficiency: format_percent(totals.efficiency_ratio * Decimal::ONE_HUNDRED),
    };

    EmployeeCostReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        as_of,
        employee_number: employee.employee_number.clone(),
        name: employee.name.clone(),
        nationality: employee.nationality.clone(),
        category: employee.category,
        category_label: employee.category.label_ar().to_string(),
        hire_date: employee.hire_date,
        years_of_service: years_of_service(employee.hire_date, as_of),
        allowances: allowance_lines(employee, config),
        totals,
        one_time_costs,
        training_provision: TrainingProvision {
            nationality_class: training.nationality_class,
            rate: training.rate,
            monthly_amount: training.monthly_amount,
            annual_amount: training.annual_amount,
        },
        end_of_service: eos.benefit,
        family_ticket: ticket.cost,
        total_employer_cost,
        display,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::TrainingPolicy;
    use crate::config::EngineMetadata;
    use crate::models::{Allowance, AllowanceType, TicketType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_type(code: &str, name: &str, name_arabic: &str, frequency: Frequency) -> AllowanceType {
        AllowanceType {
            code: code.to_string(),
            name: name.to_string(),
            name_arabic: name_arabic.to_string(),
            frequency,
            custom_months: None,
            is_active: true,
        }
    }

    fn create_test_config() -> EngineConfig {
        EngineConfig::new(
            EngineMetadata::default(),
            TrainingPolicy::default(),
            vec![
                create_type("housing_allowance", "Housing Allowance", "بدل السكن", Frequency::Monthly),
                create_type("tickets", "Tickets", "التذاكر", Frequency::Annual),
            ],
        )
        .unwrap()
    }

    fn create_allowance(code: &str, frequency: Frequency, amount: &str) -> Allowance {
        Allowance {
            allowance_type: code.to_string(),
            frequency,
            custom_months: None,
            amount: dec(amount),
            nature: AllowanceNature::Cash,
            notes: String::new(),
            is_active: true,
        }
    }

    fn create_test_employee() -> Employee {
        Employee {
            employee_number: "EMP001".to_string(),
            name: "أحمد محمد".to_string(),
            nationality: "مصري".to_string(),
            id_number: "1234567890".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2018, 10, 1).unwrap(),
            category: EmployeeCategory::Engineer,
            basic_salary: dec("5000"),
            insurance_type: Default::default(),
            num_wives: 1,
            num_children: 2,
            recruitment_cost: dec("1000"),
            training_cost: dec("500"),
            ticket_type: TicketType::Biennial,
            family_ticket_cost: Decimal::ZERO,
            is_active: true,
            allowances: vec![
                create_allowance("housing_allowance", Frequency::Monthly, "1500"),
                create_allowance("tickets", Frequency::Annual, "2400"),
            ],
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_report_totals() {
        let report = build_cost_report(&create_test_employee(), &create_test_config(), as_of());

        assert_eq!(report.totals.total_monthly_allowances, dec("1700"));
        assert_eq!(report.totals.monthly_gross_salary, dec("6700"));
        assert_eq!(report.totals.total_annual_allowances, dec("20400"));
        // 6700 x 12 + 20400
        assert_eq!(report.totals.annual_total_cost, dec("100800"));
    }

    #[test]
    fn test_one_time_costs_shown_separately() {
        let report = build_cost_report(&create_test_employee(), &create_test_config(), as_of());

        assert_eq!(report.one_time_costs.recruitment_cost, dec("1000"));
        assert_eq!(report.one_time_costs.training_cost, dec("500"));
        assert_eq!(report.one_time_costs.total, dec("1500"));
        assert_eq!(report.totals.annual_total_cost, dec("100800"));
        assert_eq!(report.totals.cost_factor, dec("100800") / dec("60000"));
    }

    #[test]
    fn test_provisions_and_benefits() {
        let report = build_cost_report(&create_test_employee(), &create_test_config(), as_of());

        assert_eq!(report.training_provision.nationality_class, NationalityClass::Expatriate);
        assert_eq!(report.training_provision.monthly_amount, dec("134"));
        assert_eq!(report.training_provision.annual_amount, dec("1608"));

        assert_eq!(report.years_of_service, 8);
        assert_eq!(report.end_of_service.cash_monthly_salary, dec("6700"));
        // 5 x 0.5 x 6700 + 3 x 6700
        assert_eq!(report.end_of_service.total, dec("36850"));

        assert_eq!(report.family_ticket.total_cost_per_cycle, dec("15000"));
        assert_eq!(report.family_ticket.annual_cost, dec("7500"));

        // 100800 + 1500 + 1608 + 7500
        assert_eq!(report.total_employer_cost, dec("111408"));
    }

    #[test]
    fn test_allowance_lines_use_catalog_names() {
        let report = build_cost_report(&create_test_employee(), &create_test_config(), as_of());

        assert_eq!(report.allowances.len(), 2);
        assert_eq!(report.allowances[0].name_arabic, "بدل السكن");
        assert_eq!(report.allowances[1].monthly_equivalent, dec("200"));
        assert_eq!(report.allowances[1].annual_equivalent, dec("2400"));
    }

    #[test]
    fn test_unknown_allowance_type_falls_back_to_code() {
        let mut employee = create_test_employee();
        employee.allowances.push(create_allowance("shift_allowance", Frequency::Monthly, "100"));

        let lines = allowance_lines(&employee, &create_test_config());
        assert_eq!(lines[2].name, "shift_allowance");
    }

    #[test]
    fn test_inactive_allowances_excluded_from_lines() {
        let mut employee = create_test_employee();
        employee.allowances[1].is_active = false;

        let report = build_cost_report(&employee, &create_test_config(), as_of());
        assert_eq!(report.allowances.len(), 1);
        assert_eq!(report.totals.total_annual_allowances, dec("18000"));
    }

    #[test]
    fn test_audit_trace_steps_are_numbered_in_order() {
        let report = build_cost_report(&create_test_employee(), &create_test_config(), as_of());
        let steps = &report.audit_trace.steps;

        // 2 prorations + gross + annual + factor + training + eos + ticket
        assert_eq!(steps.len(), 8);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert_eq!(steps[5].rule_id, "training_cost_percentage");
        assert_eq!(steps[6].rule_id, "end_of_service_benefit");
        assert_eq!(steps[7].rule_id, "family_ticket_cost");
    }

    #[test]
    fn test_report_ids_are_unique() {
        let employee = create_test_employee();
        let config = create_test_config();
        let first = build_cost_report(&employee, &config, as_of());
        let second = build_cost_report(&employee, &config, as_of());
        assert_ne!(first.report_id, second.report_id);
    }

    #[test]
    fn test_display_figures_use_currency_label() {
        let metadata = EngineMetadata {
            currency_label: "ريال".to_string(),
            ..Default::default()
        };
        let config = EngineConfig::new(metadata, TrainingPolicy::default(), vec![]).unwrap();
        let mut employee = create_test_employee();
        employee.allowances.clear();

        let report = build_cost_report(&employee, &config, as_of());
        assert_eq!(report.display.annual_total_cost, "60,000.00 ريال");
        assert_eq!(report.display.efficiency, "100.00%");
    }

    #[test]
    fn test_category_label() {
        let report = build_cost_report(&create_test_employee(), &create_test_config(), as_of());
        assert_eq!(report.category_label, "مهندس");
    }
}

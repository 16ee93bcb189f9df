//! Salary and annual cost totals for an employee.
//!
//! This module sums prorated allowances into the monthly gross salary,
//! the annual allowance total and the annual total cost, and derives the
//! cost factor from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, AuditWarning, Employee};

use super::allowance_proration::{
    MONTHS_PER_YEAR, annual_equivalent, monthly_equivalent, prorate_allowance,
};

/// Sum of monthly-equivalents over the employee's active allowances.
pub fn total_monthly_allowances(employee: &Employee) -> Decimal {
    employee
        .active_allowances()
        .map(|a| monthly_equivalent(a.amount, a.frequency, a.custom_months))
        .sum()
}

/// Basic salary plus total monthly allowances.
pub fn monthly_gross_salary(employee: &Employee) -> Decimal {
    employee.basic_salary + total_monthly_allowances(employee)
}

/// Sum of annual-equivalents over the employee's active allowances.
pub fn total_annual_allowances(employee: &Employee) -> Decimal {
    employee
        .active_allowances()
        .map(|a| annual_equivalent(a.amount, a.frequency, a.custom_months))
        .sum()
}

/// Recruitment cost plus training cost, not prorated.
pub fn one_time_costs(employee: &Employee) -> Decimal {
    employee.recruitment_cost + employee.training_cost
}

/// (monthly gross salary x 12) + total annual allowances.
///
/// One-time recruitment and training costs are never part of this figure.
pub fn annual_total_cost(employee: &Employee) -> Decimal {
    monthly_gross_salary(employee) * Decimal::from(MONTHS_PER_YEAR)
        + total_annual_allowances(employee)
}

/// Annual total cost divided by annual basic salary.
///
/// Returns zero when the basic salary is zero or negative.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::calculation::cost_factor;
/// use rust_decimal::Decimal;
///
/// assert_eq!(cost_factor(Decimal::new(120_000, 0), Decimal::new(5000, 0)), Decimal::TWO);
/// assert_eq!(cost_factor(Decimal::new(120_000, 0), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn cost_factor(annual_total_cost: Decimal, basic_salary: Decimal) -> Decimal {
    if basic_salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    annual_total_cost / (basic_salary * Decimal::from(MONTHS_PER_YEAR))
}

/// Annual basic salary divided by annual total cost.
///
/// Returns zero when the annual total cost is zero or negative.
pub fn efficiency_ratio(basic_salary: Decimal, annual_total_cost: Decimal) -> Decimal {
    if annual_total_cost <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    basic_salary * Decimal::from(MONTHS_PER_YEAR) / annual_total_cost
}

/// The derived salary and cost figures for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryTotals {
    /// Latest basic salary.
    pub basic_salary: Decimal,
    /// Sum of monthly-equivalents of active allowances.
    pub total_monthly_allowances: Decimal,
    /// Basic salary plus total monthly allowances.
    pub monthly_gross_salary: Decimal,
    /// Sum of annual-equivalents of active allowances.
    pub total_annual_allowances: Decimal,
    /// Recruitment plus training cost.
    pub one_time_costs: Decimal,
    /// (monthly gross x 12) + total annual allowances.
    pub annual_total_cost: Decimal,
    /// Annual total cost / (basic salary x 12).
    pub cost_factor: Decimal,
    /// (basic salary x 12) / annual total cost.
    pub efficiency_ratio: Decimal,
}

impl SalaryTotals {
    /// Computes the figures without recording audit steps.
    pub fn for_employee(employee: &Employee) -> Self {
        let total_monthly = total_monthly_allowances(employee);
        let total_annual = total_annual_allowances(employee);
        let monthly_gross = employee.basic_salary + total_monthly;
        let annual_cost = monthly_gross * Decimal::from(MONTHS_PER_YEAR) + total_annual;

        Self {
            basic_salary: employee.basic_salary,
            total_monthly_allowances: total_monthly,
            monthly_gross_salary: monthly_gross,
            total_annual_allowances: total_annual,
            one_time_costs: one_time_costs(employee),
            annual_total_cost: annual_cost,
            cost_factor: cost_factor(annual_cost, employee.basic_salary),
            efficiency_ratio: efficiency_ratio(employee.basic_salary, annual_cost),
        }
    }
}

/// The result of calculating salary totals, including audit steps.
#[derive(Debug, Clone)]
pub struct SalaryTotalsResult {
    /// The calculated figures.
    pub totals: SalaryTotals,
    /// One proration step per active allowance, then one step per total.
    pub audit_steps: Vec<AuditStep>,
    /// Fallback warnings raised while prorating allowances.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates every salary and cost total for an employee.
///
/// Steps are numbered from `step_number` upwards.
pub fn calculate_salary_totals(employee: &Employee, step_number: u32) -> SalaryTotalsResult {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step = step_number;

    let mut total_monthly = Decimal::ZERO;
    let mut total_annual = Decimal::ZERO;
    for allowance in employee.active_allowances() {
        let proration = prorate_allowance(allowance, step);
        total_monthly += proration.monthly_equivalent;
        total_annual += proration.annual_equivalent;
        audit_steps.push(proration.audit_step);
        warnings.extend(proration.warning);
        step += 1;
    }

    let monthly_gross = employee.basic_salary + total_monthly;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "monthly_gross_salary".to_string(),
        rule_name: "Monthly Gross Salary".to_string(),
        input: serde_json::json!({
            "basic_salary": employee.basic_salary.normalize().to_string(),
            "total_monthly_allowances": total_monthly.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_gross_salary": monthly_gross.normalize().to_string()
        }),
        reasoning: format!(
            "${} basic + ${} monthly allowances = ${}",
            employee.basic_salary.normalize(),
            total_monthly.round_dp(2).normalize(),
            monthly_gross.round_dp(2).normalize()
        ),
    });
    step += 1;

    let months = Decimal::from(MONTHS_PER_YEAR);
    let annual_cost = monthly_gross * months + total_annual;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "annual_total_cost".to_string(),
        rule_name: "Annual Total Cost".to_string(),
        input: serde_json::json!({
            "monthly_gross_salary": monthly_gross.normalize().to_string(),
            "total_annual_allowances": total_annual.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual_total_cost": annual_cost.normalize().to_string()
        }),
        reasoning: format!(
            "${} x 12 + ${} annual allowances = ${} (one-time costs excluded)",
            monthly_gross.round_dp(2).normalize(),
            total_annual.round_dp(2).normalize(),
            annual_cost.round_dp(2).normalize()
        ),
    });
    step += 1;

    let factor = cost_factor(annual_cost, employee.basic_salary);
    let reasoning = if employee.basic_salary <= Decimal::ZERO {
        "Basic salary is zero - cost factor defined as 0".to_string()
    } else {
        format!(
            "${} / (${} x 12) = {}",
            annual_cost.round_dp(2).normalize(),
            employee.basic_salary.normalize(),
            factor.round_dp(4).normalize()
        )
    };
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "cost_factor".to_string(),
        rule_name: "Cost Factor".to_string(),
        input: serde_json::json!({
            "annual_total_cost": annual_cost.normalize().to_string(),
            "basic_salary": employee.basic_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "cost_factor": factor.normalize().to_string()
        }),
        reasoning,
    });

    SalaryTotalsResult {
        totals: SalaryTotals {
            basic_salary: employee.basic_salary,
            total_monthly_allowances: total_monthly,
            monthly_gross_salary: monthly_gross,
            total_annual_allowances: total_annual,
            one_time_costs: one_time_costs(employee),
            annual_total_cost: annual_cost,
            cost_factor: factor,
            efficiency_ratio: efficiency_ratio(employee.basic_salary, annual_cost),
        },
        audit_steps,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allowance, AllowanceNature, EmployeeCategory, Frequency};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
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

    fn create_test_employee(basic_salary: &str, allowances: Vec<Allowance>) -> Employee {
        Employee {
            employee_number: "EMP001".to_string(),
            name: "Test Employee".to_string(),
            nationality: "سعودي".to_string(),
            id_number: String::new(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            category: EmployeeCategory::Staff,
            basic_salary: dec(basic_salary),
            insurance_type: Default::default(),
            num_wives: 0,
            num_children: 0,
            recruitment_cost: dec("1000"),
            training_cost: dec("500"),
            ticket_type: Default::default(),
            family_ticket_cost: Decimal::ZERO,
            is_active: true,
            allowances,
        }
    }

    fn mixed_allowances() -> Vec<Allowance> {
        vec![
            create_allowance("housing_allowance", Frequency::Monthly, "1500"),
            create_allowance("medical_insurance", Frequency::Annual, "2400"),
            create_allowance("tickets", Frequency::Biennial, "4800"),
            create_allowance("signing_bonus", Frequency::OneTime, "3000"),
        ]
    }

    #[test]
    fn test_total_monthly_allowances_sums_monthly_equivalents() {
        let employee = create_test_employee("5000", mixed_allowances());
        // 1500 + 2400/12 + 4800/24 + 0
        assert_eq!(total_monthly_allowances(&employee), dec("1900"));
    }

    #[test]
    fn test_monthly_gross_salary_adds_basic() {
        let employee = create_test_employee("5000", mixed_allowances());
        assert_eq!(monthly_gross_salary(&employee), dec("6900"));
    }

    #[test]
    fn test_total_annual_allowances_sums_annual_equivalents() {
        let employee = create_test_employee("5000", mixed_allowances());
        // 18000 + 2400 + 2400 + 3000
        assert_eq!(total_annual_allowances(&employee), dec("25800"));
    }

    #[test]
    fn test_inactive_allowances_are_ignored() {
        let mut allowances = mixed_allowances();
        for allowance in &mut allowances {
            allowance.is_active = false;
        }
        let employee = create_test_employee("5000", allowances);

        assert_eq!(total_monthly_allowances(&employee), Decimal::ZERO);
        assert_eq!(total_annual_allowances(&employee), Decimal::ZERO);
        assert_eq!(monthly_gross_salary(&employee), dec("5000"));
    }

    #[test]
    fn test_one_time_costs_sum_recruitment_and_training() {
        let employee = create_test_employee("5000", vec![]);
        assert_eq!(one_time_costs(&employee), dec("1500"));
    }

    #[test]
    fn test_annual_total_cost_formula() {
        let employee = create_test_employee("5000", mixed_allowances());
        // 6900 * 12 + 25800
        assert_eq!(annual_total_cost(&employee), dec("108600"));
    }

    #[test]
    fn test_annual_total_cost_excludes_one_time_costs() {
        let employee = create_test_employee("5000", vec![]);
        assert_eq!(annual_total_cost(&employee), dec("60000"));
    }

    #[test]
    fn test_cost_factor_without_allowances_is_one() {
        let employee = create_test_employee("5000", vec![]);
        assert_eq!(
            cost_factor(annual_total_cost(&employee), employee.basic_salary),
            Decimal::ONE
        );
    }

    #[test]
    fn test_cost_factor_zero_salary_is_zero() {
        let employee = create_test_employee("0", mixed_allowances());
        assert!(annual_total_cost(&employee) > Decimal::ZERO);
        assert_eq!(
            cost_factor(annual_total_cost(&employee), employee.basic_salary),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_efficiency_ratio_zero_cost_is_zero() {
        assert_eq!(efficiency_ratio(dec("5000"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(efficiency_ratio(dec("5000"), dec("120000")), dec("0.5"));
    }

    #[test]
    fn test_calculate_salary_totals_matches_standalone_functions() {
        let employee = create_test_employee("5000", mixed_allowances());
        let result = calculate_salary_totals(&employee, 1);

        assert_eq!(result.totals.total_monthly_allowances, dec("1900"));
        assert_eq!(result.totals.monthly_gross_salary, dec("6900"));
        assert_eq!(result.totals.total_annual_allowances, dec("25800"));
        assert_eq!(result.totals.one_time_costs, dec("1500"));
        assert_eq!(result.totals.annual_total_cost, dec("108600"));
        assert_eq!(result.totals.cost_factor, dec("1.81"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_calculate_salary_totals_audit_steps_are_sequential() {
        let employee = create_test_employee("5000", mixed_allowances());
        let result = calculate_salary_totals(&employee, 3);

        // 4 allowances + monthly gross + annual cost + cost factor
        assert_eq!(result.audit_steps.len(), 7);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(result.audit_steps[4].rule_id, "monthly_gross_salary");
        assert_eq!(result.audit_steps[5].rule_id, "annual_total_cost");
        assert_eq!(result.audit_steps[6].rule_id, "cost_factor");
        assert!(result.audit_steps[5].reasoning.contains("one-time costs excluded"));
    }

    #[test]
    fn test_calculate_salary_totals_zero_salary_reasoning() {
        let employee = create_test_employee("0", vec![]);
        let result = calculate_salary_totals(&employee, 1);

        assert_eq!(result.totals.cost_factor, Decimal::ZERO);
        let last = result.audit_steps.last().unwrap();
        assert!(last.reasoning.contains("defined as 0"));
    }

    #[test]
    fn test_calculate_salary_totals_collects_custom_fallback_warning() {
        let mut custom = create_allowance("site_allowance", Frequency::Custom, "1200");
        custom.custom_months = None;
        let employee = create_test_employee("5000", vec![custom]);

        let result = calculate_salary_totals(&employee, 1);

        assert_eq!(result.totals.total_monthly_allowances, dec("100"));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "CUSTOM_MONTHS_DEFAULTED");
    }

    #[test]
    fn test_for_employee_matches_audited_totals() {
        let employee = create_test_employee("5000", mixed_allowances());
        assert_eq!(
            SalaryTotals::for_employee(&employee),
            calculate_salary_totals(&employee, 1).totals
        );
    }
}

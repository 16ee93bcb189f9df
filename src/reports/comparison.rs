//! Side-by-side employee comparison.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    MONTHS_PER_YEAR, SalaryTotals, TrainingPolicy, family_ticket_cost, training_cost_percentage,
    years_of_service,
};
use crate::models::{Employee, EmployeeCategory};

/// One employee's headline figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Position after sorting, starting at 1.
    pub rank: usize,
    /// Employee number.
    pub employee_number: String,
    /// Employee name.
    pub name: String,
    /// Workforce category.
    pub category: EmployeeCategory,
    /// Arabic category label.
    pub category_label: String,
    /// Nationality as recorded.
    pub nationality: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Whole years of service at the report date.
    pub years_of_service: u32,
    /// Basic salary.
    pub basic_salary: Decimal,
    /// Monthly-equivalents of active allowances.
    pub monthly_allowances: Decimal,
    /// Monthly gross salary.
    pub monthly_gross_salary: Decimal,
    /// Annual total cost.
    pub annual_total_cost: Decimal,
    /// Cost factor.
    pub cost_factor: Decimal,
    /// Efficiency ratio.
    pub efficiency_ratio: Decimal,
    /// Training provision over twelve months.
    pub annual_training_provision: Decimal,
    /// Family ticket cost spread over one year.
    pub annual_family_ticket_cost: Decimal,
}

/// Builds comparison rows, most expensive first.
///
/// Ties on annual total cost are broken by employee number.
pub fn compare_employees(
    employees: &[&Employee],
    training_policy: &TrainingPolicy,
    as_of: NaiveDate,
) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = employees
        .iter()
        .map(|employee| {
            let totals = SalaryTotals::for_employee(employee);
            let monthly_training =
                training_cost_percentage(totals.monthly_gross_salary, &employee.nationality, training_policy);
            let ticket = family_ticket_cost(
                employee.basic_salary,
                employee.num_wives,
                employee.num_children,
                employee.ticket_type,
            );
            ComparisonRow {
                rank: 0,
                employee_number: employee.employee_number.clone(),
                name: employee.name.clone(),
                category: employee.category,
                category_label: employee.category.label_ar().to_string(),
                nationality: employee.nationality.clone(),
                hire_date: employee.hire_date,
                years_of_service: years_of_service(employee.hire_date, as_of),
                basic_salary: totals.basic_salary,
                monthly_allowances: totals.total_monthly_allowances,
                monthly_gross_salary: totals.monthly_gross_salary,
                annual_total_cost: totals.annual_total_cost,
                cost_factor: totals.cost_factor,
                efficiency_ratio: totals.efficiency_ratio,
                annual_training_provision: monthly_training * Decimal::from(MONTHS_PER_YEAR),
                annual_family_ticket_cost: ticket.annual_cost,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.annual_total_cost
            .cmp(&a.annual_total_cost)
            .then_with(|| a.employee_number.cmp(&b.employee_number))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

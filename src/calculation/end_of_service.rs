//! End-of-service benefit calculation.
//!
//! The benefit accrues half a month of cash salary for each of the first
//! five years of service and a full month for every year after that.
//! Only whole years count.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Employee};

use super::allowance_proration::monthly_equivalent;
use super::service_years::years_of_service;

/// Years accrued at the first-tier rate.
pub const EOS_TIER_1_YEARS: u32 = 5;

/// Months of salary accrued per year in the first tier (0.5).
pub fn eos_tier_1_rate() -> Decimal {
    Decimal::new(5, 1)
}

/// Months of salary accrued per year after the first tier (1.0).
pub fn eos_tier_2_rate() -> Decimal {
    Decimal::ONE
}

/// The end-of-service breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndOfServiceBenefit {
    /// Whole years of service.
    pub years_of_service: u32,
    /// Basic salary plus monthly-equivalents of active cash allowances.
    pub cash_monthly_salary: Decimal,
    /// Years accrued at half a month each.
    pub tier_1_years: u32,
    /// Years accrued at a full month each.
    pub tier_2_years: u32,
    /// tier_1_years x 0.5 x salary.
    pub tier_1_amount: Decimal,
    /// tier_2_years x 1 x salary.
    pub tier_2_amount: Decimal,
    /// tier_1_amount + tier_2_amount.
    pub total: Decimal,
}

/// Basic salary plus monthly-equivalents of active cash allowances.
///
/// In-kind allowances are excluded.
pub fn cash_monthly_salary(employee: &Employee) -> Decimal {
    employee.basic_salary
        + employee
            .active_allowances()
            .filter(|a| a.is_cash())
            .map(|a| monthly_equivalent(a.amount, a.frequency, a.custom_months))
            .sum::<Decimal>()
}

/// Splits years of service into the two tiers and sums the benefit.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::calculation::end_of_service_benefit;
/// use rust_decimal::Decimal;
///
/// let benefit = end_of_service_benefit(7, Decimal::new(1000, 0));
/// assert_eq!(benefit.tier_1_amount, Decimal::new(2500, 0));
/// assert_eq!(benefit.tier_2_amount, Decimal::new(2000, 0));
/// assert_eq!(benefit.total, Decimal::new(4500, 0));
/// ```
pub fn end_of_service_benefit(years_of_service: u32, cash_monthly_salary: Decimal) -> EndOfServiceBenefit {
    let tier_1_years = years_of_service.min(EOS_TIER_1_YEARS);
    let tier_2_years = years_of_service.saturating_sub(EOS_TIER_1_YEARS);

    let tier_1_amount = Decimal::from(tier_1_years) * eos_tier_1_rate() * cash_monthly_salary;
    let tier_2_amount = Decimal::from(tier_2_years) * eos_tier_2_rate() * cash_monthly_salary;

    EndOfServiceBenefit {
        years_of_service,
        cash_monthly_salary,
        tier_1_years,
        tier_2_years,
        tier_1_amount,
        tier_2_amount,
        total: tier_1_amount + tier_2_amount,
    }
}

/// The result of calculating the end-of-service benefit, including the audit step.
#[derive(Debug, Clone)]
pub struct EndOfServiceResult {
    /// The benefit breakdown.
    pub benefit: EndOfServiceBenefit,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates an employee's end-of-service benefit as of a date.
pub fn calculate_end_of_service(employee: &Employee, as_of: NaiveDate, step_number: u32) -> EndOfServiceResult {
    let years = years_of_service(employee.hire_date, as_of);
    let salary = cash_monthly_salary(employee);
    let benefit = end_of_service_benefit(years, salary);

    let audit_step = AuditStep {
        step_number,
        rule_id: "end_of_service_benefit".to_string(),
        rule_name: "End of Service Benefit".to_string(),
        input: serde_json::json!({
            "hire_date": employee.hire_date.to_string(),
            "as_of": as_of.to_string(),
            "cash_monthly_salary": salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "years_of_service": benefit.years_of_service,
            "tier_1_years": benefit.tier_1_years,
            "tier_2_years": benefit.tier_2_years,
            "tier_1_amount": benefit.tier_1_amount.normalize().to_string(),
            "tier_2_amount": benefit.tier_2_amount.normalize().to_string(),
            "total": benefit.total.normalize().to_string()
        }),
        reasoning: format!(
            "{} years: {} x 0.5 x ${} + {} x 1 x ${} = ${}",
            benefit.years_of_service,
            benefit.tier_1_years,
            salary.round_dp(2).normalize(),
            benefit.tier_2_years,
            salary.round_dp(2).normalize(),
            benefit.total.round_dp(2).normalize()
        ),
    };

    EndOfServiceResult {
        benefit,
        audit_step,
    }
}

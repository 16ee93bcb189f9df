//! Allowance proration by payout frequency.
//!
//! Converts an allowance amount paid on its own cycle into the
//! monthly-equivalent and annual-equivalent figures the cost reports use.

use rust_decimal::Decimal;

use crate::models::{Allowance, AuditStep, AuditWarning, Frequency};

/// Months in a year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Months in a biennial cycle.
pub const BIENNIAL_MONTHS: u32 = 24;

/// Cycle length used when a custom frequency has no valid month count.
pub const DEFAULT_CUSTOM_MONTHS: u32 = 12;

/// Returns the effective cycle length in months for a custom frequency.
///
/// A missing or zero month count falls back to [`DEFAULT_CUSTOM_MONTHS`].
pub fn effective_custom_months(custom_months: Option<u32>) -> u32 {
    match custom_months {
        Some(months) if months > 0 => months,
        _ => DEFAULT_CUSTOM_MONTHS,
    }
}

/// Returns true if a custom frequency had to fall back to the default cycle.
pub fn custom_months_defaulted(frequency: Frequency, custom_months: Option<u32>) -> bool {
    frequency == Frequency::Custom && !matches!(custom_months, Some(m) if m > 0)
}

/// Returns the monthly-equivalent of an allowance amount.
///
/// One-time amounts never contribute to a recurring monthly figure.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::calculation::monthly_equivalent;
/// use hr_cost_engine::models::Frequency;
/// use rust_decimal::Decimal;
///
/// let amount = Decimal::new(600, 0);
/// assert_eq!(monthly_equivalent(amount, Frequency::Custom, Some(6)), Decimal::new(100, 0));
/// assert_eq!(monthly_equivalent(amount, Frequency::OneTime, None), Decimal::ZERO);
/// ```
pub fn monthly_equivalent(amount: Decimal, frequency: Frequency, custom_months: Option<u32>) -> Decimal {
    match frequency {
        Frequency::Monthly => amount,
        Frequency::Annual => amount / Decimal::from(MONTHS_PER_YEAR),
        Frequency::Biennial => amount / Decimal::from(BIENNIAL_MONTHS),
        Frequency::Custom => amount / Decimal::from(effective_custom_months(custom_months)),
        Frequency::OneTime => Decimal::ZERO,
    }
}

/// Returns the annual-equivalent of an allowance amount.
///
/// One-time amounts count in full in the year they occur.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::calculation::annual_equivalent;
/// use hr_cost_engine::models::Frequency;
/// use rust_decimal::Decimal;
///
/// let amount = Decimal::new(600, 0);
/// assert_eq!(annual_equivalent(amount, Frequency::Custom, Some(6)), Decimal::new(1200, 0));
/// assert_eq!(annual_equivalent(amount, Frequency::OneTime, None), amount);
/// ```
pub fn annual_equivalent(amount: Decimal, frequency: Frequency, custom_months: Option<u32>) -> Decimal {
    match frequency {
        Frequency::Annual => amount,
        Frequency::Monthly => amount * Decimal::from(MONTHS_PER_YEAR),
        Frequency::Biennial => amount / Decimal::TWO,
        Frequency::Custom => {
            (amount * Decimal::from(MONTHS_PER_YEAR))
                / Decimal::from(effective_custom_months(custom_months))
        }
        Frequency::OneTime => amount,
    }
}

/// The result of prorating one allowance, including the audit step.
#[derive(Debug, Clone)]
pub struct AllowanceProrationResult {
    /// The allowance type code.
    pub allowance_type: String,
    /// The monthly-equivalent amount.
    pub monthly_equivalent: Decimal,
    /// The annual-equivalent amount.
    pub annual_equivalent: Decimal,
    /// Set when a custom cycle fell back to the default month count.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prorates a single allowance grant and records the audit step.
pub fn prorate_allowance(allowance: &Allowance, step_number: u32) -> AllowanceProrationResult {
    let monthly = monthly_equivalent(allowance.amount, allowance.frequency, allowance.custom_months);
    let annual = annual_equivalent(allowance.amount, allowance.frequency, allowance.custom_months);

    let cycle = match allowance.frequency {
        Frequency::Monthly => "paid monthly".to_string(),
        Frequency::Annual => format!("paid every {} months", MONTHS_PER_YEAR),
        Frequency::Biennial => format!("paid every {} months", BIENNIAL_MONTHS),
        Frequency::Custom => format!(
            "paid every {} months",
            effective_custom_months(allowance.custom_months)
        ),
        Frequency::OneTime => "paid once, excluded from monthly figures".to_string(),
    };

    let warning = custom_months_defaulted(allowance.frequency, allowance.custom_months).then(|| {
        AuditWarning {
            code: "CUSTOM_MONTHS_DEFAULTED".to_string(),
            message: format!(
                "Allowance '{}' has a custom frequency without a positive month count; using {} months",
                allowance.allowance_type, DEFAULT_CUSTOM_MONTHS
            ),
            severity: "low".to_string(),
        }
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowance_proration".to_string(),
        rule_name: "Allowance Proration".to_string(),
        input: serde_json::json!({
            "allowance_type": allowance.allowance_type,
            "amount": allowance.amount.normalize().to_string(),
            "frequency": allowance.frequency.as_str(),
            "custom_months": allowance.custom_months
        }),
        output: serde_json::json!({
            "monthly_equivalent": monthly.normalize().to_string(),
            "annual_equivalent": annual.normalize().to_string()
        }),
        reasoning: format!(
            "'{}' ${} {}: ${} per month, ${} per year",
            allowance.allowance_type,
            allowance.amount.normalize(),
            cycle,
            monthly.round_dp(2).normalize(),
            annual.round_dp(2).normalize()
        ),
    };

    AllowanceProrationResult {
        allowance_type: allowance.allowance_type.clone(),
        monthly_equivalent: monthly,
        annual_equivalent: annual,
        warning,
        audit_step,
    }
}

//! Training cost provision by nationality class.
//!
//! The provision is a policy percentage of the monthly gross salary: one
//! rate for Saudi nationals, another for expatriates. Both the nationality
//! markers and the rates live in [`TrainingPolicy`] so they can be audited
//! and overridden from configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::allowance_proration::MONTHS_PER_YEAR;

/// Nationality strings recognized as Saudi nationals (compared trimmed,
/// case-insensitively).
pub const SAUDI_NATIONALITY_MARKERS: [&str; 5] = ["سعودي", "سعودية", "saudi", "saudi arabian", "ksa"];

/// Training provision rate for Saudi nationals (5%).
pub fn national_training_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Training provision rate for expatriates (2%).
pub fn expatriate_training_rate() -> Decimal {
    Decimal::new(2, 2)
}

/// The nationality classes the training policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NationalityClass {
    /// Saudi national.
    SaudiNational,
    /// Any other nationality.
    Expatriate,
}

fn default_markers() -> Vec<String> {
    SAUDI_NATIONALITY_MARKERS.iter().map(|m| m.to_string()).collect()
}

/// The training cost policy table.
///
/// # Example
///
/// ```
/// use hr_cost_engine::calculation::{NationalityClass, TrainingPolicy};
///
/// let policy = TrainingPolicy::default();
/// assert_eq!(policy.classify("  SAUDI "), NationalityClass::SaudiNational);
/// assert_eq!(policy.classify("مصري"), NationalityClass::Expatriate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPolicy {
    /// Nationality strings that classify as [`NationalityClass::SaudiNational`].
    #[serde(default = "default_markers")]
    pub national_markers: Vec<String>,
    /// Rate applied to Saudi nationals.
    #[serde(default = "national_training_rate")]
    pub national_rate: Decimal,
    /// Rate applied to everyone else.
    #[serde(default = "expatriate_training_rate")]
    pub expatriate_rate: Decimal,
}

impl Default for TrainingPolicy {
    fn default() -> Self {
        Self {
            national_markers: default_markers(),
            national_rate: national_training_rate(),
            expatriate_rate: expatriate_training_rate(),
        }
    }
}

impl TrainingPolicy {
    /// Classifies a recorded nationality.
    pub fn classify(&self, nationality: &str) -> NationalityClass {
        let nationality = nationality.trim().to_lowercase();
        let is_national = self
            .national_markers
            .iter()
            .any(|marker| marker.trim().to_lowercase() == nationality);

        if is_national {
            NationalityClass::SaudiNational
        } else {
            NationalityClass::Expatriate
        }
    }

    /// Returns the provision rate for a nationality class.
    pub fn rate_for(&self, class: NationalityClass) -> Decimal {
        match class {
            NationalityClass::SaudiNational => self.national_rate,
            NationalityClass::Expatriate => self.expatriate_rate,
        }
    }

    /// Returns the full {class → rate} table.
    pub fn rates(&self) -> [(NationalityClass, Decimal); 2] {
        [
            (NationalityClass::SaudiNational, self.national_rate),
            (NationalityClass::Expatriate, self.expatriate_rate),
        ]
    }
}

/// Monthly training provision for a monthly gross salary and nationality.
pub fn training_cost_percentage(
    monthly_gross_salary: Decimal,
    nationality: &str,
    policy: &TrainingPolicy,
) -> Decimal {
    monthly_gross_salary * policy.rate_for(policy.classify(nationality))
}

/// The result of calculating the training provision, including the audit step.
#[derive(Debug, Clone)]
pub struct TrainingCostResult {
    /// The nationality class applied.
    pub nationality_class: NationalityClass,
    /// The rate applied.
    pub rate: Decimal,
    /// Monthly provision.
    pub monthly_amount: Decimal,
    /// Monthly provision x 12.
    pub annual_amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the training provision and records the audit step.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::calculation::{TrainingPolicy, calculate_training_cost};
/// use rust_decimal::Decimal;
///
/// let policy = TrainingPolicy::default();
/// let result = calculate_training_cost(Decimal::new(10_000, 0), "سعودي", &policy, 1);
/// assert_eq!(result.monthly_amount, Decimal::new(500, 0));
/// ```
pub fn calculate_training_cost(
    monthly_gross_salary: Decimal,
    nationality: &str,
    policy: &TrainingPolicy,
    step_number: u32,
) -> TrainingCostResult {
    let nationality_class = policy.classify(nationality);
    let rate = policy.rate_for(nationality_class);
    let monthly_amount = monthly_gross_salary * rate;
    let annual_amount = monthly_amount * Decimal::from(MONTHS_PER_YEAR);

    let class_label = match nationality_class {
        NationalityClass::SaudiNational => "saudi_national",
        NationalityClass::Expatriate => "expatriate",
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "training_cost_percentage".to_string(),
        rule_name: "Training Cost Provision".to_string(),
        input: serde_json::json!({
            "monthly_gross_salary": monthly_gross_salary.normalize().to_string(),
            "nationality": nationality
        }),
        output: serde_json::json!({
            "nationality_class": class_label,
            "rate": rate.normalize().to_string(),
            "monthly_amount": monthly_amount.normalize().to_string(),
            "annual_amount": annual_amount.normalize().to_string()
        }),
        reasoning: format!(
            "Nationality '{}' is {}: ${} x {}% = ${} per month",
            nationality,
            class_label,
            monthly_gross_salary.round_dp(2).normalize(),
            (rate * Decimal::ONE_HUNDRED).normalize(),
            monthly_amount.round_dp(2).normalize()
        ),
    };

    TrainingCostResult {
        nationality_class,
        rate,
        monthly_amount,
        annual_amount,
        audit_step,
    }
}

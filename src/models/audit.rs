//! Audit trail records shared by every calculation.
//!
//! Each cost formula records an [`AuditStep`] so a report can show how
//! every figure was derived.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording one formula application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the formula that was applied.
    pub rule_id: String,
    /// The human-readable name of the formula.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag silent fallbacks, such as a custom-cycle allowance
/// without a month count, that did not stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a report.
///
/// # Example
///
/// ```
/// use hr_cost_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serializes_json_payloads() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "monthly_gross".to_string(),
            rule_name: "Monthly Gross Salary".to_string(),
            input: serde_json::json!({ "basic_salary": "5000" }),
            output: serde_json::json!({ "monthly_gross": "6500" }),
            reasoning: "$5000 + $1500 = $6500".to_string(),
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["step_number"], 3);
        assert_eq!(json["input"]["basic_salary"], "5000");
        assert_eq!(json["output"]["monthly_gross"], "6500");

        let back: AuditStep = serde_json::from_value(json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_audit_trace_with_warning() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning {
                code: "CUSTOM_MONTHS_DEFAULTED".to_string(),
                message: "custom cycle without month count".to_string(),
                severity: "low".to_string(),
            }],
            duration_us: 10,
        };

        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("CUSTOM_MONTHS_DEFAULTED"));
    }
}

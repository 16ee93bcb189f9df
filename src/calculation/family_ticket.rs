//! Family ticket cost calculation.
//!
//! Family tickets cost one basic salary per dependant per ticket cycle.
//! Biennial tickets are amortized over two years.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Employee, TicketType};

/// The family ticket breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTicketCost {
    /// The ticket cycle.
    pub ticket_type: TicketType,
    /// Wives plus children.
    pub family_members: u32,
    /// basic salary x family members, paid once per cycle.
    pub total_cost_per_cycle: Decimal,
    /// Per-cycle cost spread over one year.
    pub annual_cost: Decimal,
}

/// Computes the family ticket breakdown.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::calculation::family_ticket_cost;
/// use hr_cost_engine::models::TicketType;
/// use rust_decimal::Decimal;
///
/// let cost = family_ticket_cost(Decimal::new(1000, 0), 1, 2, TicketType::Biennial);
/// assert_eq!(cost.family_members, 3);
/// assert_eq!(cost.total_cost_per_cycle, Decimal::new(3000, 0));
/// assert_eq!(cost.annual_cost, Decimal::new(1500, 0));
/// ```
pub fn family_ticket_cost(
    basic_salary: Decimal,
    num_wives: u32,
    num_children: u32,
    ticket_type: TicketType,
) -> FamilyTicketCost {
    let family_members = num_wives.saturating_add(num_children);
    let total_cost_per_cycle = basic_salary * Decimal::from(family_members);
    let annual_cost = match ticket_type {
        TicketType::Annual => total_cost_per_cycle,
        TicketType::Biennial => total_cost_per_cycle / Decimal::TWO,
    };

    FamilyTicketCost {
        ticket_type,
        family_members,
        total_cost_per_cycle,
        annual_cost,
    }
}

/// The result of calculating family ticket cost, including the audit step.
#[derive(Debug, Clone)]
pub struct FamilyTicketResult {
    /// The ticket breakdown.
    pub cost: FamilyTicketCost,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates an employee's family ticket cost and records the audit step.
pub fn calculate_family_ticket(employee: &Employee, step_number: u32) -> FamilyTicketResult {
    let cost = family_ticket_cost(
        employee.basic_salary,
        employee.num_wives,
        employee.num_children,
        employee.ticket_type,
    );

    let (ticket_type, cycle_note) = match cost.ticket_type {
        TicketType::Annual => ("annual", "paid every year"),
        TicketType::Biennial => ("biennial", "amortized over two years"),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "family_ticket_cost".to_string(),
        rule_name: "Family Ticket Cost".to_string(),
        input: serde_json::json!({
            "basic_salary": employee.basic_salary.normalize().to_string(),
            "num_wives": employee.num_wives,
            "num_children": employee.num_children,
            "ticket_type": ticket_type
        }),
        output: serde_json::json!({
            "family_members": cost.family_members,
            "total_cost_per_cycle": cost.total_cost_per_cycle.normalize().to_string(),
            "annual_cost": cost.annual_cost.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} family members = ${} per cycle, {}: ${} per year",
            employee.basic_salary.normalize(),
            cost.family_members,
            cost.total_cost_per_cycle.normalize(),
            cycle_note,
            cost.annual_cost.normalize()
        ),
    };

    FamilyTicketResult { cost, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeCategory;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(ticket_type: TicketType) -> Employee {
        Employee {
            employee_number: "EMP001".to_string(),
            name: "Test Employee".to_string(),
            nationality: "هندي".to_string(),
            id_number: String::new(),
            hire_date: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
            category: EmployeeCategory::Technician,
            basic_salary: dec("1000"),
            insurance_type: Default::default(),
            num_wives: 1,
            num_children: 2,
            recruitment_cost: Decimal::ZERO,
            training_cost: Decimal::ZERO,
            ticket_type,
            family_ticket_cost: Decimal::ZERO,
            is_active: true,
            allowances: vec![],
        }
    }

    #[test]
    fn test_annual_ticket() {
        let cost = family_ticket_cost(dec("1000"), 1, 2, TicketType::Annual);
        assert_eq!(cost.family_members, 3);
        assert_eq!(cost.annual_cost, dec("3000"));
        assert_eq!(cost.total_cost_per_cycle, dec("3000"));
    }

    #[test]
    fn test_biennial_ticket_is_halved_annually() {
        let cost = family_ticket_cost(dec("1000"), 1, 2, TicketType::Biennial);
        assert_eq!(cost.annual_cost, dec("1500"));
        assert_eq!(cost.total_cost_per_cycle, dec("3000"));
    }

    #[test]
    fn test_no_family_is_zero() {
        let cost = family_ticket_cost(dec("1000"), 0, 0, TicketType::Annual);
        assert_eq!(cost.family_members, 0);
        assert_eq!(cost.annual_cost, Decimal::ZERO);
    }

    #[test]
    fn test_calculate_family_ticket_audit_step() {
        let employee = create_test_employee(TicketType::Biennial);
        let result = calculate_family_ticket(&employee, 5);

        assert_eq!(result.cost.annual_cost, dec("1500"));
        assert_eq!(result.audit_step.step_number, 5);
        assert_eq!(result.audit_step.input["ticket_type"], "biennial");
        assert_eq!(result.audit_step.output["family_members"], 3);
        assert!(result.audit_step.reasoning.contains("amortized"));
    }

    #[test]
    fn test_calculate_family_ticket_annual_reasoning() {
        let employee = create_test_employee(TicketType::Annual);
        let result = calculate_family_ticket(&employee, 1);

        assert_eq!(result.audit_step.output["annual_cost"], "3000");
        assert!(result.audit_step.reasoning.contains("every year"));
    }
}

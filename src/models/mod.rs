//! Core data models for the HR cost engine.
//!
//! This module contains the employee and allowance records the calculation
//! engine reads, and the audit types every calculation produces.

mod allowance;
mod audit;
mod employee;

pub use allowance::{Allowance, AllowanceNature, AllowanceType, Frequency};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{Employee, EmployeeCategory, InsuranceType, MAX_AMOUNT, MAX_DEPENDANTS, TicketType};

//! Cost calculation engine.
//!
//! Pure functions deriving every monetary figure the reports use from an
//! employee and its active allowances: allowance proration by frequency,
//! monthly gross salary, annual totals and cost factor, training cost
//! provision, years of service, end-of-service benefit and family ticket
//! cost. Nothing here performs I/O or returns an error; invalid inputs fall
//! back to zero or to a 12-month cycle.

mod allowance_proration;
mod end_of_service;
mod family_ticket;
mod salary_totals;
mod service_years;
mod training_cost;

pub use allowance_proration::{
    AllowanceProrationResult, BIENNIAL_MONTHS, DEFAULT_CUSTOM_MONTHS, MONTHS_PER_YEAR,
    annual_equivalent, custom_months_defaulted, effective_custom_months, monthly_equivalent,
    prorate_allowance,
};
pub use end_of_service::{
    EOS_TIER_1_YEARS, EndOfServiceBenefit, EndOfServiceResult, calculate_end_of_service,
    cash_monthly_salary, end_of_service_benefit, eos_tier_1_rate, eos_tier_2_rate,
};
pub use family_ticket::{
    FamilyTicketCost, FamilyTicketResult, calculate_family_ticket, family_ticket_cost,
};
pub use salary_totals::{
    SalaryTotals, SalaryTotalsResult, annual_total_cost, calculate_salary_totals, cost_factor,
    efficiency_ratio, monthly_gross_salary, one_time_costs, total_annual_allowances,
    total_monthly_allowances,
};
pub use service_years::years_of_service;
pub use training_cost::{
    NationalityClass, SAUDI_NATIONALITY_MARKERS, TrainingCostResult, TrainingPolicy,
    calculate_training_cost, expatriate_training_rate, national_training_rate,
    training_cost_percentage,
};

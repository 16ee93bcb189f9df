//! Cost reports built on the calculation engine.
//!
//! A [`EmployeeCostReport`] carries every figure and the audit trace for a
//! single employee. Aggregated reports ([`WorkforceSummary`] and the
//! comparison rows) cover the employees a [`ReportFilter`] selects.
//!
//! # Example
//!
//! ```
//! use hr_cost_engine::config::EngineConfig;
//! use hr_cost_engine::reports::{ReportFilter, summarize_workforce};
//! use chrono::NaiveDate;
//!
//! let employees = vec![];
//! let selected = ReportFilter::default().apply(&employees);
//! let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let summary = summarize_workforce(&selected, &EngineConfig::default(), as_of);
//! assert_eq!(summary.totals.employee_count, 0);
//! ```

mod comparison;
mod cost_report;
mod filter;
mod format;
mod summary;

pub use comparison::{ComparisonRow, compare_employees};
pub use cost_report::{
    AllowanceLine, DisplayFigures, EmployeeCostReport, OneTimeCosts, TrainingProvision, allowance_lines,
    build_cost_report,
};
pub use filter::ReportFilter;
pub use format::{format_amount, format_amount_whole, format_currency, format_percent, percent_of};
pub use summary::{
    AllowanceSummary, CostBreakdown, EfficiencyMetrics, GroupSummary, RECENT_HIRE_DAYS, RECENT_HIRE_LIMIT,
    RecentHire, SalaryBand, WorkforceSummary, WorkforceTotals, summarize_workforce,
};

//! Workforce-wide cost summary.
//!
//! Aggregates the per-employee figures of a selected workforce into totals,
//! category and nationality groups, salary bands, an allowance summary and
//! efficiency metrics. Shares are percentages of the selected head count.
//! Recent hires are counted back from the report date.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::SalaryTotals;
use crate::config::EngineConfig;
use crate::models::{Employee, EmployeeCategory, Frequency};

use super::cost_report::OneTimeCosts;
use super::format::percent_of;

/// Headline totals over the selected employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceTotals {
    /// Number of employees covered.
    pub employee_count: usize,
    /// Sum of basic salaries.
    pub total_basic_salary: Decimal,
    /// Sum of monthly gross salaries.
    pub total_monthly_gross: Decimal,
    /// Sum of annual total costs.
    pub total_annual_cost: Decimal,
    /// Mean monthly gross salary.
    pub average_monthly_gross: Decimal,
    /// Mean annual total cost.
    pub average_annual_cost: Decimal,
    /// Mean of the per-employee cost factors.
    pub average_cost_factor: Decimal,
}

/// Where the money goes, summed over the selected employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Monthly basic salaries.
    pub basic_salaries: Decimal,
    /// Monthly gross minus basic.
    pub monthly_allowances: Decimal,
    /// Annual-equivalents of all active allowances.
    pub annual_allowances: Decimal,
    /// One-time recruitment and training costs.
    pub one_time_costs: OneTimeCosts,
}

/// Figures for one category or nationality group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group key (category identifier or nationality).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Employees in the group.
    pub employee_count: usize,
    /// Sum of basic salaries.
    pub total_basic_salary: Decimal,
    /// Mean basic salary.
    pub average_basic_salary: Decimal,
    /// Sum of monthly gross salaries.
    pub total_monthly_gross: Decimal,
    /// Sum of annual total costs.
    pub total_annual_cost: Decimal,
    /// Mean annual total cost.
    pub average_annual_cost: Decimal,
    /// Share of the selected head count, in percent.
    pub share_percent: Decimal,
}

/// Head count within one basic salary band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    /// Display label.
    pub label: String,
    /// Arabic display label.
    pub label_ar: String,
    /// Inclusive lower bound; `None` for the lowest band.
    pub min: Option<Decimal>,
    /// Exclusive upper bound; `None` for the highest band.
    pub max: Option<Decimal>,
    /// Employees in the band.
    pub employee_count: usize,
    /// Share of the selected head count, in percent.
    pub share_percent: Decimal,
}

/// Aggregated grants of one allowance type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceSummary {
    /// Allowance type code.
    pub allowance_type: String,
    /// Arabic name from the catalog, or the code.
    pub name_arabic: String,
    /// Payout cycle of the catalog type, if the type is cataloged.
    pub frequency: Option<Frequency>,
    /// Sum of the per-cycle amounts.
    pub total_amount: Decimal,
    /// Employees holding an active grant of this type.
    pub employee_count: usize,
    /// Mean per-cycle amount.
    pub average_amount: Decimal,
    /// Share of the selected head count, in percent.
    pub percent_of_employees: Decimal,
}

/// Spread of efficiency ratios (annual basic / annual total cost).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    /// Highest ratio.
    pub highest: Decimal,
    /// Lowest ratio.
    pub lowest: Decimal,
    /// Mean ratio.
    pub average: Decimal,
    /// Employees with a ratio of at least 0.7.
    pub at_or_above_70_percent: usize,
    /// Employees with a ratio below 0.5.
    pub below_50_percent: usize,
}

/// An employee hired within [`RECENT_HIRE_DAYS`] of the report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHire {
    /// Employee number.
    pub employee_number: String,
    /// Employee name.
    pub name: String,
    /// Nationality as recorded.
    pub nationality: String,
    /// Arabic category label.
    pub category_label: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Basic salary.
    pub basic_salary: Decimal,
}

/// Look-back window for recent hires, in days.
pub const RECENT_HIRE_DAYS: u64 = 30;

/// At most this many recent hires are listed.
pub const RECENT_HIRE_LIMIT: usize = 5;

/// The full workforce summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkforceSummary {
    /// Unique report id.
    pub report_id: Uuid,
    /// When the summary was produced.
    pub generated_at: DateTime<Utc>,
    /// The date recent hires are counted back from.
    pub as_of: NaiveDate,
    /// Headline totals.
    pub totals: WorkforceTotals,
    /// Cost breakdown.
    pub cost_breakdown: CostBreakdown,
    /// Groups per category, in category order; empty categories omitted.
    pub by_category: Vec<GroupSummary>,
    /// Groups per nationality, largest first.
    pub by_nationality: Vec<GroupSummary>,
    /// Salary distribution, lowest band first.
    pub salary_bands: Vec<SalaryBand>,
    /// Allowance summary, catalog types first.
    pub allowances: Vec<AllowanceSummary>,
    /// Efficiency ratio spread.
    pub efficiency: EfficiencyMetrics,
    /// Newest hires within the look-back window, newest first.
    pub recent_hires: Vec<RecentHire>,
}

/// Band boundaries as (lower, upper, label, Arabic label).
const SALARY_BANDS: [(Option<i64>, Option<i64>, &str, &str); 5] = [
    (None, Some(1_000), "under 1,000", "أقل من 1,000"),
    (Some(1_000), Some(2_000), "1,000 - 2,000", "1,000 - 2,000"),
    (Some(2_000), Some(5_000), "2,000 - 5,000", "2,000 - 5,000"),
    (Some(5_000), Some(10_000), "5,000 - 10,000", "5,000 - 10,000"),
    (Some(10_000), None, "10,000 and above", "أكثر من 10,000"),
];

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(count)
}

#[derive(Default)]
struct GroupAccumulator {
    employee_count: usize,
    total_basic_salary: Decimal,
    total_monthly_gross: Decimal,
    total_annual_cost: Decimal,
}

impl GroupAccumulator {
    fn add(&mut self, totals: &SalaryTotals) {
        self.employee_count += 1;
        self.total_basic_salary += totals.basic_salary;
        self.total_monthly_gross += totals.monthly_gross_salary;
        self.total_annual_cost += totals.annual_total_cost;
    }

    fn finish(self, key: String, label: String, head_count: usize) -> GroupSummary {
        GroupSummary {
            key,
            label,
            employee_count: self.employee_count,
            total_basic_salary: self.total_basic_salary,
            average_basic_salary: average(self.total_basic_salary, self.employee_count),
            total_monthly_gross: self.total_monthly_gross,
            total_annual_cost: self.total_annual_cost,
            average_annual_cost: average(self.total_annual_cost, self.employee_count),
            share_percent: head_share(self.employee_count, head_count),
        }
    }
}

fn head_share(count: usize, head_count: usize) -> Decimal {
    percent_of(Decimal::from(count), Decimal::from(head_count))
}

fn salary_bands(employees: &[&Employee]) -> Vec<SalaryBand> {
    SALARY_BANDS
        .iter()
        .map(|&(min, max, label, label_ar)| {
            let min = min.map(Decimal::from);
            let max = max.map(Decimal::from);
            let employee_count = employees
                .iter()
                .filter(|e| min.is_none_or(|m| e.basic_salary >= m))
                .filter(|e| max.is_none_or(|m| e.basic_salary < m))
                .count();
            SalaryBand {
                label: label.to_string(),
                label_ar: label_ar.to_string(),
                min,
                max,
                employee_count,
                share_percent: head_share(employee_count, employees.len()),
            }
        })
        .collect()
}

fn allowance_summaries(employees: &[&Employee], config: &EngineConfig) -> Vec<AllowanceSummary> {
    let mut totals: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for allowance in employees.iter().flat_map(|e| e.active_allowances()) {
        let entry = totals.entry(allowance.allowance_type.as_str()).or_default();
        entry.0 += allowance.amount;
        entry.1 += 1;
    }

    let catalog_codes: Vec<&str> = config.active_allowance_types().map(|t| t.code.as_str()).collect();
    let uncataloged: BTreeSet<&str> = totals
        .keys()
        .copied()
        .filter(|code| !catalog_codes.contains(code))
        .collect();

    catalog_codes
        .into_iter()
        .chain(uncataloged)
        .filter_map(|code| {
            let &(total_amount, employee_count) = totals.get(code)?;
            let catalog_type = config.allowance_type(code).ok();
            Some(AllowanceSummary {
                allowance_type: code.to_string(),
                name_arabic: catalog_type.map_or_else(|| code.to_string(), |t| t.name_arabic.clone()),
                frequency: catalog_type.map(|t| t.frequency),
                total_amount,
                employee_count,
                average_amount: average(total_amount, employee_count),
                percent_of_employees: head_share(employee_count, employees.len()),
            })
        })
        .collect()
}

fn efficiency_metrics(ratios: &[Decimal]) -> EfficiencyMetrics {
    let (Some(highest), Some(lowest)) = (ratios.iter().max(), ratios.iter().min()) else {
        return EfficiencyMetrics::default();
    };
    let high_mark = Decimal::new(7, 1);
    let low_mark = Decimal::new(5, 1);

    EfficiencyMetrics {
        highest: *highest,
        lowest: *lowest,
        average: average(ratios.iter().sum(), ratios.len()),
        at_or_above_70_percent: ratios.iter().filter(|r| **r >= high_mark).count(),
        below_50_percent: ratios.iter().filter(|r| **r < low_mark).count(),
    }
}

fn recent_hires(employees: &[&Employee], as_of: NaiveDate) -> Vec<RecentHire> {
    let since = as_of
        .checked_sub_days(Days::new(RECENT_HIRE_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let mut hires: Vec<&Employee> = employees
        .iter()
        .copied()
        .filter(|e| e.hire_date >= since && e.hire_date <= as_of)
        .collect();
    hires.sort_by(|a, b| {
        b.hire_date
            .cmp(&a.hire_date)
            .then_with(|| a.employee_number.cmp(&b.employee_number))
    });

    hires
        .into_iter()
        .take(RECENT_HIRE_LIMIT)
        .map(|e| RecentHire {
            employee_number: e.employee_number.clone(),
            name: e.name.clone(),
            nationality: e.nationality.clone(),
            category_label: e.category.label_ar().to_string(),
            hire_date: e.hire_date,
            basic_salary: e.basic_salary,
        })
        .collect()
}

/// Summarizes the cost of a selected workforce.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::config::EngineConfig;
/// use hr_cost_engine::reports::summarize_workforce;
/// use chrono::NaiveDate;
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let summary = summarize_workforce(&[], &EngineConfig::default(), as_of);
/// assert_eq!(summary.totals.employee_count, 0);
/// assert_eq!(summary.salary_bands.len(), 5);
/// assert!(summary.recent_hires.is_empty());
/// ```
pub fn summarize_workforce(employees: &[&Employee], config: &EngineConfig, as_of: NaiveDate) -> WorkforceSummary {
    let head_count = employees.len();
    let figures: Vec<SalaryTotals> = employees.iter().map(|e| SalaryTotals::for_employee(e)).collect();

    let mut overall = GroupAccumulator::default();
    let mut annual_allowances = Decimal::ZERO;
    let mut cost_factors = Decimal::ZERO;
    let mut one_time_costs = OneTimeCosts::default();
    let mut categories: HashMap<EmployeeCategory, GroupAccumulator> = HashMap::new();
    let mut nationalities: HashMap<String, GroupAccumulator> = HashMap::new();

    for (employee, totals) in employees.iter().zip(&figures) {
        overall.add(totals);
        annual_allowances += totals.total_annual_allowances;
        cost_factors += totals.cost_factor;
        one_time_costs.accumulate(&OneTimeCosts::of(employee));
        categories.entry(employee.category).or_default().add(totals);
        nationalities
            .entry(employee.nationality.trim().to_string())
            .or_default()
            .add(totals);
    }

    let by_category = EmployeeCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let group = categories.remove(&category)?;
            Some(group.finish(category.as_str().to_string(), category.label_ar().to_string(), head_count))
        })
        .collect();

    let mut by_nationality: Vec<GroupSummary> = nationalities
        .into_iter()
        .map(|(nationality, group)| group.finish(nationality.clone(), nationality, head_count))
        .collect();
    by_nationality.sort_by(|a, b| b.employee_count.cmp(&a.employee_count).then_with(|| a.key.cmp(&b.key)));

    let ratios: Vec<Decimal> = figures.iter().map(|t| t.efficiency_ratio).collect();

    WorkforceSummary {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        as_of,
        totals: WorkforceTotals {
            employee_count: head_count,
            total_basic_salary: overall.total_basic_salary,
            total_monthly_gross: overall.total_monthly_gross,
            total_annual_cost: overall.total_annual_cost,
            average_monthly_gross: average(overall.total_monthly_gross, head_count),
            average_annual_cost: average(overall.total_annual_cost, head_count),
            average_cost_factor: average(cost_factors, head_count),
        },
        cost_breakdown: CostBreakdown {
            basic_salaries: overall.total_basic_salary,
            monthly_allowances: overall.total_monthly_gross - overall.total_basic_salary,
            annual_allowances,
            one_time_costs,
        },
        by_category,
        by_nationality,
        salary_bands: salary_bands(employees),
        allowances: allowance_summaries(employees, config),
        efficiency: efficiency_metrics(&ratios),
        recent_hires: recent_hires(employees, as_of),
    }
}

//! Row extraction: turns decoded sheet rows into employees.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Allowance, AllowanceType, Employee, EmployeeCategory, InsuranceType, TicketType,
};

use super::coercion::{CellValue, Parsed, parse_count, parse_date, parse_decimal, parse_label};
use super::header_map::{ColumnKind, EmployeeField, classify_column, infer_frequency, infer_nature};

/// A decoded sheet: one header row and the data rows below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    /// Header row.
    pub headers: Vec<String>,
    /// Data rows; row `i` is sheet row `i + 2`.
    pub rows: Vec<Vec<CellValue>>,
}

/// A field that was blank or unreadable and received its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFallback {
    /// The field that was defaulted.
    pub field: EmployeeField,
    /// The cell content as text ("" for blank cells).
    pub raw: String,
}

/// An allowance cell that held something other than a number.
///
/// The column contributes no grant, the same as a zero, but is kept here
/// so an unreadable amount stays distinguishable from an explicit zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceFallback {
    /// The allowance column header.
    pub column: String,
    /// The cell content as text.
    pub raw: String,
}

/// An employee read from one sheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedRow {
    /// 1-based sheet row number.
    pub row: usize,
    /// The employee with its allowance grants.
    pub employee: Employee,
    /// Fields that were defaulted.
    pub fallbacks: Vec<FieldFallback>,
    /// Allowance columns whose cells could not be read.
    #[serde(default)]
    pub allowance_fallbacks: Vec<AllowanceFallback>,
}

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    /// 1-based sheet row number.
    pub row: usize,
    /// What was wrong.
    pub message: String,
}

/// The result of importing a sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Imported employees, one per employee number, in first-seen order.
    pub employees: Vec<ImportedRow>,
    /// Employee numbers seen for the first time.
    pub created_count: usize,
    /// Rows that replaced an earlier row with the same employee number.
    pub updated_count: usize,
    /// Allowance grants read across all imported rows.
    pub allowances_count: usize,
    /// Rows that failed.
    pub errors: Vec<ImportRowError>,
    /// Headers that were neither employee fields nor allowance columns.
    pub ignored_columns: Vec<String>,
    /// Allowance types created for allowance columns missing from the catalog.
    pub inferred_types: Vec<AllowanceType>,
}

/// Imports every row of a sheet.
///
/// `today` is used as the hire date when a row has none. Fully blank rows
/// are skipped. A failing row is recorded in [`ImportOutcome::errors`] and
/// does not stop the import.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::config::EngineConfig;
/// use hr_cost_engine::import::{CellValue, SheetData, import_sheet};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let sheet = SheetData {
///     headers: vec!["رقم الموظف".into(), "الاسم".into(), "الجنسية".into(), "الراتب الأساسي".into()],
///     rows: vec![vec!["EMP001".into(), "أحمد".into(), "سعودي".into(), CellValue::from(5000_i64)]],
/// };
/// let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let outcome = import_sheet(&sheet, &EngineConfig::default(), today);
///
/// assert_eq!(outcome.created_count, 1);
/// assert_eq!(outcome.employees[0].employee.basic_salary, Decimal::new(5000, 0));
/// ```
pub fn import_sheet(sheet: &SheetData, config: &EngineConfig, today: NaiveDate) -> ImportOutcome {
    let columns: Vec<ColumnKind> = sheet
        .headers
        .iter()
        .map(|header| classify_column(header, config))
        .collect();

    let mut outcome = ImportOutcome {
        ignored_columns: sheet
            .headers
            .iter()
            .zip(&columns)
            .filter(|(header, kind)| **kind == ColumnKind::Ignored && !header.trim().is_empty())
            .map(|(header, _)| header.trim().to_string())
            .collect(),
        ..Default::default()
    };

    for (index, cells) in sheet.rows.iter().enumerate() {
        let row = index + 2;
        if cells.iter().all(CellValue::is_blank) {
            continue;
        }

        match extract_row(row, cells, &columns, config, today, &mut outcome.inferred_types) {
            Ok(imported) => {
                outcome.allowances_count += imported.employee.allowances.len();
                match outcome
                    .employees
                    .iter_mut()
                    .find(|e| e.employee.employee_number == imported.employee.employee_number)
                {
                    Some(existing) => {
                        debug!(
                            row,
                            employee_number = %imported.employee.employee_number,
                            "Row replaces earlier row with the same employee number"
                        );
                        *existing = imported;
                        outcome.updated_count += 1;
                    }
                    None => {
                        outcome.employees.push(imported);
                        outcome.created_count += 1;
                    }
                }
            }
            Err(e) => {
                warn!(row, error = %e, "Import row rejected");
                outcome.errors.push(ImportRowError {
                    row,
                    message: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// Cell access for one row, collecting fallbacks as fields are read.
struct RowReader<'a> {
    row: usize,
    cells: &'a [CellValue],
    columns: &'a [ColumnKind],
    fallbacks: Vec<FieldFallback>,
}

impl<'a> RowReader<'a> {
    fn cell(&self, field: EmployeeField) -> &'a CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.columns
            .iter()
            .position(|kind| *kind == ColumnKind::Field(field))
            .and_then(|i| self.cells.get(i))
            .unwrap_or(EMPTY)
    }

    fn text(&self, field: EmployeeField) -> String {
        self.cell(field).as_text()
    }

    fn keep<T>(&mut self, field: EmployeeField, parsed: Parsed<T>) -> T {
        if parsed.fallback_used {
            let raw = self.cell(field).as_text();
            debug!(row = self.row, field = field.as_str(), raw = %raw, "Field defaulted during import");
            self.fallbacks.push(FieldFallback { field, raw });
        }
        parsed.value
    }

    fn decimal(&mut self, field: EmployeeField) -> Decimal {
        let parsed = parse_decimal(self.cell(field));
        self.keep(field, parsed)
    }

    fn count(&mut self, field: EmployeeField) -> u32 {
        let parsed = parse_count(self.cell(field));
        self.keep(field, parsed)
    }

    fn date(&mut self, field: EmployeeField, default: NaiveDate) -> NaiveDate {
        let parsed = parse_date(self.cell(field), default);
        self.keep(field, parsed)
    }

    fn label<T>(&mut self, field: EmployeeField, default: T, lookup: impl Fn(&str) -> Option<T>) -> T {
        let parsed = parse_label(self.cell(field), default, lookup);
        self.keep(field, parsed)
    }
}

/// Reads one row into an employee.
fn extract_row(
    row: usize,
    cells: &[CellValue],
    columns: &[ColumnKind],
    config: &EngineConfig,
    today: NaiveDate,
    inferred_types: &mut Vec<AllowanceType>,
) -> EngineResult<ImportedRow> {
    let mut reader = RowReader {
        row,
        cells,
        columns,
        fallbacks: Vec::new(),
    };

    for field in EmployeeField::REQUIRED {
        if reader.cell(field).is_blank() {
            return Err(EngineError::InvalidImportRow {
                row,
                message: format!("missing required field '{}'", field.as_str()),
            });
        }
    }

    // A salary that is present but unreadable is a row error, not a zero.
    let salary = parse_decimal(reader.cell(EmployeeField::BasicSalary));
    if salary.fallback_used {
        return Err(EngineError::InvalidImportRow {
            row,
            message: format!(
                "basic_salary '{}' is not a number",
                reader.text(EmployeeField::BasicSalary)
            ),
        });
    }

    let mut employee = Employee {
        employee_number: reader.text(EmployeeField::EmployeeNumber),
        name: reader.text(EmployeeField::Name),
        nationality: reader.text(EmployeeField::Nationality),
        id_number: reader.text(EmployeeField::IdNumber),
        hire_date: reader.date(EmployeeField::HireDate, today),
        category: reader.label(EmployeeField::Category, EmployeeCategory::Staff, EmployeeCategory::from_label),
        basic_salary: salary.value,
        insurance_type: reader.label(EmployeeField::InsuranceType, InsuranceType::default(), InsuranceType::from_label),
        num_wives: reader.count(EmployeeField::NumWives),
        num_children: reader.count(EmployeeField::NumChildren),
        recruitment_cost: reader.decimal(EmployeeField::RecruitmentCost),
        training_cost: reader.decimal(EmployeeField::TrainingCost),
        ticket_type: reader.label(EmployeeField::TicketType, TicketType::default(), TicketType::from_label),
        family_ticket_cost: reader.decimal(EmployeeField::FamilyTicketCost),
        is_active: true,
        allowances: Vec::new(),
    };

    let mut allowance_fallbacks = Vec::new();
    for (kind, cell) in columns.iter().zip(cells) {
        let ColumnKind::Allowance(header) = kind else {
            continue;
        };
        let amount = parse_decimal(cell);
        if amount.fallback_used && !cell.is_blank() {
            let raw = cell.as_text();
            debug!(row, column = %header, raw = %raw, "Allowance amount defaulted during import");
            allowance_fallbacks.push(AllowanceFallback {
                column: header.clone(),
                raw,
            });
        }
        if amount.value <= Decimal::ZERO {
            continue;
        }

        let allowance = allowance_for_column(header, amount.value, config, inferred_types);
        if employee.upsert_allowance(allowance) {
            debug!(row, column = %header, "Later column replaced an allowance of the same type");
        }
    }

    employee.validate().map_err(|e| EngineError::InvalidImportRow {
        row,
        message: e.to_string(),
    })?;

    Ok(ImportedRow {
        row,
        employee,
        fallbacks: reader.fallbacks,
        allowance_fallbacks,
    })
}

/// Builds the allowance for an allowance column, inferring a type when the
/// catalog has none by that name.
fn allowance_for_column(
    header: &str,
    amount: Decimal,
    config: &EngineConfig,
    inferred_types: &mut Vec<AllowanceType>,
) -> Allowance {
    let nature = infer_nature(header);

    let allowance_type = match config
        .find_allowance_type(header)
        .or_else(|| inferred_types.iter().find(|t| t.matches_name(header)))
    {
        Some(known) => known.clone(),
        None => {
            let inferred = AllowanceType {
                code: header.to_string(),
                name: header.to_string(),
                name_arabic: header.to_string(),
                frequency: infer_frequency(header),
                custom_months: None,
                is_active: true,
            };
            debug!(column = %header, frequency = %inferred.frequency, "Inferred allowance type");
            inferred_types.push(inferred.clone());
            inferred
        }
    };

    let mut allowance = allowance_type.grant(amount, nature);
    allowance.notes = format!("Imported from column '{}'", header);
    allowance
}

//! Header normalization and column classification.
//!
//! Sheet headers are matched against a static table of recognized Arabic
//! and English names. A header that is not an employee field is either an
//! allowance column or ignored; the decision is explicit and reported.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::EngineConfig;
use crate::models::{AllowanceNature, Frequency};

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*?\)").expect("valid parenthesized-suffix pattern"));

/// Employee fields that can be filled from a sheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeField {
    /// Employee number.
    EmployeeNumber,
    /// Full name.
    Name,
    /// Nationality.
    Nationality,
    /// Hire date.
    HireDate,
    /// National id or residence number.
    IdNumber,
    /// Workforce category.
    Category,
    /// Basic salary.
    BasicSalary,
    /// Insurance tier.
    InsuranceType,
    /// Number of wives.
    NumWives,
    /// Number of children.
    NumChildren,
    /// One-time recruitment cost.
    RecruitmentCost,
    /// One-time training cost.
    TrainingCost,
    /// Ticket cycle.
    TicketType,
    /// Recorded family ticket cost.
    FamilyTicketCost,
}

impl EmployeeField {
    /// Fields a row cannot be imported without.
    pub const REQUIRED: [EmployeeField; 4] = [
        EmployeeField::EmployeeNumber,
        EmployeeField::Name,
        EmployeeField::Nationality,
        EmployeeField::BasicSalary,
    ];

    /// Fields in import template order.
    pub const TEMPLATE_ORDER: [EmployeeField; 14] = [
        EmployeeField::EmployeeNumber,
        EmployeeField::Name,
        EmployeeField::Nationality,
        EmployeeField::HireDate,
        EmployeeField::IdNumber,
        EmployeeField::Category,
        EmployeeField::BasicSalary,
        EmployeeField::InsuranceType,
        EmployeeField::NumWives,
        EmployeeField::NumChildren,
        EmployeeField::RecruitmentCost,
        EmployeeField::TrainingCost,
        EmployeeField::TicketType,
        EmployeeField::FamilyTicketCost,
    ];

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeField::EmployeeNumber => "employee_number",
            EmployeeField::Name => "name",
            EmployeeField::Nationality => "nationality",
            EmployeeField::HireDate => "hire_date",
            EmployeeField::IdNumber => "id_number",
            EmployeeField::Category => "category",
            EmployeeField::BasicSalary => "basic_salary",
            EmployeeField::InsuranceType => "insurance_type",
            EmployeeField::NumWives => "num_wives",
            EmployeeField::NumChildren => "num_children",
            EmployeeField::RecruitmentCost => "recruitment_cost",
            EmployeeField::TrainingCost => "training_cost",
            EmployeeField::TicketType => "ticket_type",
            EmployeeField::FamilyTicketCost => "family_ticket_cost",
        }
    }

    /// Returns the Arabic template header.
    pub fn header_ar(&self) -> &'static str {
        match self {
            EmployeeField::EmployeeNumber => "رقم الموظف",
            EmployeeField::Name => "الاسم",
            EmployeeField::Nationality => "الجنسية",
            EmployeeField::HireDate => "تاريخ التوظيف",
            EmployeeField::IdNumber => "رقم الهوية",
            EmployeeField::Category => "الفئة",
            EmployeeField::BasicSalary => "الراتب الأساسي",
            EmployeeField::InsuranceType => "نوع التأمين",
            EmployeeField::NumWives => "عدد الزوجات",
            EmployeeField::NumChildren => "عدد الأبناء",
            EmployeeField::RecruitmentCost => "تكلفة الاستقدام",
            EmployeeField::TrainingCost => "تكلفة التدريب",
            EmployeeField::TicketType => "نوع التذكرة",
            EmployeeField::FamilyTicketCost => "تكلفة تذاكر العائلة",
        }
    }

    /// Returns true if rows without this field are rejected.
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

/// Recognized header strings. Entries are compared after [`normalize_header`].
pub static HEADER_TABLE: &[(&str, EmployeeField)] = &[
    ("رقم الموظف", EmployeeField::EmployeeNumber),
    ("employee_number", EmployeeField::EmployeeNumber),
    ("employee no", EmployeeField::EmployeeNumber),
    ("الاسم", EmployeeField::Name),
    ("اسم الموظف", EmployeeField::Name),
    ("name", EmployeeField::Name),
    ("الجنسية", EmployeeField::Nationality),
    ("nationality", EmployeeField::Nationality),
    ("تاريخ التوظيف", EmployeeField::HireDate),
    ("تاريخ التعيين", EmployeeField::HireDate),
    ("hire_date", EmployeeField::HireDate),
    ("رقم الهوية", EmployeeField::IdNumber),
    ("رقم الهوية/الإقامة", EmployeeField::IdNumber),
    ("رقم الإقامة", EmployeeField::IdNumber),
    ("id_number", EmployeeField::IdNumber),
    ("الفئة", EmployeeField::Category),
    ("category", EmployeeField::Category),
    ("الراتب الأساسي", EmployeeField::BasicSalary),
    ("آخر راتب أساسي", EmployeeField::BasicSalary),
    ("basic_salary", EmployeeField::BasicSalary),
    ("نوع التأمين", EmployeeField::InsuranceType),
    ("نوع التأمين الطبي", EmployeeField::InsuranceType),
    ("insurance_type", EmployeeField::InsuranceType),
    ("عدد الزوجات", EmployeeField::NumWives),
    ("num_wives", EmployeeField::NumWives),
    ("عدد الأبناء", EmployeeField::NumChildren),
    ("عدد الاطفال", EmployeeField::NumChildren),
    ("num_children", EmployeeField::NumChildren),
    ("تكلفة الاستقدام", EmployeeField::RecruitmentCost),
    ("recruitment_cost", EmployeeField::RecruitmentCost),
    ("تكلفة التدريب", EmployeeField::TrainingCost),
    ("training_cost", EmployeeField::TrainingCost),
    ("نوع التذكرة", EmployeeField::TicketType),
    ("نوع التذاكر", EmployeeField::TicketType),
    ("ticket_type", EmployeeField::TicketType),
    ("تكلفة تذاكر العائلة", EmployeeField::FamilyTicketCost),
    ("family_ticket_cost", EmployeeField::FamilyTicketCost),
];

/// Substrings marking a header as an allowance column.
pub const ALLOWANCE_KEYWORDS: [&str; 4] = ["بدل", "allowance", "تعويض", "علاوة"];

const ANNUAL_KEYWORDS: [&str; 3] = ["سنوي", "annual", "yearly"];
const ONE_TIME_KEYWORDS: [&str; 3] = ["مرة", "one_time", "bonus"];
const IN_KIND_KEYWORDS: [&str; 3] = ["عيني", "in_kind", "benefit"];

/// Strips parenthesized suffixes, trims, lowercases and turns underscores
/// and runs of whitespace into single spaces.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::import::normalize_header;
///
/// assert_eq!(normalize_header("رقم الموظف (مطلوب)"), "رقم الموظف");
/// assert_eq!(normalize_header(" Basic_Salary (required) "), "basic salary");
/// ```
pub fn normalize_header(header: &str) -> String {
    let stripped = PARENTHESIZED.replace_all(header, "");
    stripped
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks a header up in [`HEADER_TABLE`].
pub fn lookup_field(header: &str) -> Option<EmployeeField> {
    let normalized = normalize_header(header);
    HEADER_TABLE
        .iter()
        .find(|(recognized, _)| normalize_header(recognized) == normalized)
        .map(|(_, field)| *field)
}

/// Returns true if the header contains an allowance keyword.
pub fn has_allowance_keyword(header: &str) -> bool {
    let normalized = normalize_header(header);
    ALLOWANCE_KEYWORDS.iter().any(|k| normalized.contains(k))
}

/// How a sheet column is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Fills an employee field.
    Field(EmployeeField),
    /// Holds an allowance amount; carries the cleaned header text.
    Allowance(String),
    /// Not used.
    Ignored,
}

/// Classifies a header. Field mapping wins over allowance detection.
pub fn classify_column(header: &str, config: &EngineConfig) -> ColumnKind {
    if let Some(field) = lookup_field(header) {
        return ColumnKind::Field(field);
    }

    let cleaned = PARENTHESIZED.replace_all(header, "").trim().to_string();
    if cleaned.is_empty() {
        return ColumnKind::Ignored;
    }

    if has_allowance_keyword(&cleaned) || config.find_allowance_type(&cleaned).is_some() {
        ColumnKind::Allowance(cleaned)
    } else {
        ColumnKind::Ignored
    }
}

/// Infers the frequency of an allowance column from its header.
pub fn infer_frequency(header: &str) -> Frequency {
    let normalized = header.to_lowercase();
    if ANNUAL_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        Frequency::Annual
    } else if ONE_TIME_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        Frequency::OneTime
    } else {
        Frequency::Monthly
    }
}

/// Infers whether an allowance column is in kind from its header.
pub fn infer_nature(header: &str) -> AllowanceNature {
    let normalized = header.to_lowercase();
    if IN_KIND_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        AllowanceNature::InKind
    } else {
        AllowanceNature::Cash
    }
}

/// Marker appended to required headers in the import template.
pub const REQUIRED_MARKER: &str = " (مطلوب)";

/// Returns the headers an import template should carry.
///
/// Employee fields come first with required ones marked, then every active
/// catalog allowance type by Arabic name. Catalog names that collide with a
/// field header are left out.
pub fn template_headers(config: &EngineConfig) -> Vec<String> {
    let mut headers: Vec<String> = EmployeeField::TEMPLATE_ORDER
        .iter()
        .map(|field| {
            if field.is_required() {
                format!("{}{}", field.header_ar(), REQUIRED_MARKER)
            } else {
                field.header_ar().to_string()
            }
        })
        .collect();

    headers.extend(
        config
            .active_allowance_types()
            .filter(|t| lookup_field(&t.name_arabic).is_none())
            .map(|t| t.name_arabic.clone()),
    );

    headers
}

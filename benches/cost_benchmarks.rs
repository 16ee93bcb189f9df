//! Performance benchmarks for the HR cost engine.
//!
//! Covers:
//! - Single employee cost report (library and HTTP)
//! - Workforce summary over 100 and 1000 employees
//! - Spreadsheet import of 1000 rows
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use hr_cost_engine::api::{AppState, create_router};
use hr_cost_engine::config::{ConfigLoader, EngineConfig};
use hr_cost_engine::import::{CellValue, SheetData, import_sheet, template_headers};
use hr_cost_engine::models::{AllowanceNature, Employee, EmployeeCategory};
use hr_cost_engine::reports::{ReportFilter, build_cost_report, summarize_workforce};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> EngineConfig {
    ConfigLoader::load("./config/default")
        .expect("Failed to load config")
        .into_config()
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Creates an employee with a handful of catalog allowances.
fn create_employee(config: &EngineConfig, i: usize) -> Employee {
    let mut employee = Employee {
        employee_number: format!("EMP{:05}", i),
        name: format!("Employee {}", i),
        nationality: if i % 3 == 0 { "سعودي" } else { "مصري" }.to_string(),
        id_number: String::new(),
        hire_date: NaiveDate::from_ymd_opt(2015 + (i % 10) as i32, 1 + (i % 12) as u32, 1).unwrap(),
        category: EmployeeCategory::ALL[i % EmployeeCategory::ALL.len()],
        basic_salary: Decimal::from(800 + (i % 50) * 250),
        insurance_type: Default::default(),
        num_wives: (i % 2) as u32,
        num_children: (i % 4) as u32,
        recruitment_cost: Decimal::from(2000),
        training_cost: Decimal::ZERO,
        ticket_type: Default::default(),
        family_ticket_cost: Decimal::ZERO,
        is_active: true,
        allowances: vec![],
    };
    for (code, amount) in [("housing_allowance", 1500), ("transportation_allowance", 400), ("tickets", 3000)] {
        let allowance = config
            .allowance_type(code)
            .expect("catalog type")
            .grant(Decimal::from(amount), AllowanceNature::Cash);
        employee.add_allowance(allowance).expect("unique allowance");
    }
    employee
}

/// Benchmark: one employee cost report with audit trace.
fn bench_cost_report(c: &mut Criterion) {
    let config = load_config();
    let employee = create_employee(&config, 1);

    c.bench_function("cost_report", |b| {
        b.iter(|| black_box(build_cost_report(black_box(&employee), &config, as_of())))
    });
}

/// Benchmark: cost report through the HTTP router.
fn bench_cost_report_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({
        "employee": {
            "employee_number": "EMP00001",
            "name": "Bench Employee",
            "nationality": "سعودي",
            "hire_date": "2019-01-01",
            "category": "staff",
            "basic_salary": "8000",
            "allowances": [
                {"allowance_type": "housing_allowance", "amount": "2000"},
                {"allowance_type": "tickets", "amount": "3600"}
            ]
        },
        "as_of": "2026-10-18"
    })
    .to_string();

    c.bench_function("cost_report_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/cost-report")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: workforce summary at increasing sizes.
fn bench_workforce_summary(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("workforce_summary");

    for size in [100usize, 1000] {
        let employees: Vec<Employee> = (0..size).map(|i| create_employee(&config, i)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &employees, |b, employees| {
            b.iter(|| {
                let selected = ReportFilter::default().apply(employees);
                black_box(summarize_workforce(&selected, &config, as_of()))
            })
        });
    }

    group.finish();
}

/// Benchmark: importing 1000 template rows.
fn bench_import(c: &mut Criterion) {
    let config = load_config();
    let headers = template_headers(&config);
    let rows: Vec<Vec<CellValue>> = (0..1000)
        .map(|i| {
            let mut row = vec![CellValue::Empty; headers.len()];
            row[0] = CellValue::from(format!("EMP{:05}", i).as_str());
            row[1] = CellValue::from("Employee");
            row[2] = CellValue::from("سعودي");
            row[3] = CellValue::from("2020-01-15");
            row[6] = CellValue::from(5000_i64);
            if let Some(cell) = row.get_mut(14) {
                *cell = CellValue::from(1500_i64);
            }
            row
        })
        .collect();
    let sheet = SheetData { headers, rows };

    let mut group = c.benchmark_group("import");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("rows_1000", |b| {
        b.iter(|| black_box(import_sheet(black_box(&sheet), &config, as_of())))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_cost_report,
    bench_cost_report_http,
    bench_workforce_summary,
    bench_import,
);

criterion_main!(benches);

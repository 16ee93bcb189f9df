//! HTTP API for the HR cost engine.
//!
//! Exposes the cost reports over JSON. Decimals travel as strings.
//!
//! | Route                     | Body                          | Returns               |
//! |---------------------------|-------------------------------|-----------------------|
//! | `POST /cost-report`       | `{ employee, as_of? }`        | employee cost report  |
//! | `POST /workforce-summary` | `{ employees, filter?, as_of? }` | workforce summary  |
//! | `POST /comparison`        | `{ employees, filter?, as_of? }` | comparison rows    |
//! | `GET /allowance-types`    |                               | allowance catalog     |
//! | `GET /import-template`    |                               | import header row     |

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AllowanceRequest, CostReportRequest, EmployeeRequest, WorkforceRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

use crate::api::leave::{LeaveSubmitResponse, LeaveSummaryRequest};
use crate::api::payroll::{ImportQuery, ImportResponse, PayrollSubmitResponse, SearchResponse};
use crate::api::timesheet::TimesheetSubmitResponse;
use crate::engine::leave::{BalancePair, LeaveBalances, LeaveSummary};
use crate::engine::stats::PayrollStats;
use crate::engine::submit::SubmitCounts;
use crate::engine::timesheet::{EmployeeWeek, TimesheetTotals};
use crate::model::leave::{LeaveField, LeaveKind, LeaveRecord};
use crate::model::payroll::{PayrollField, PayrollRecord};
use crate::model::timesheet::{TimesheetField, TimesheetRecord, TimesheetStatus};
use crate::sheet::filter::{LeaveFilter, PayrollFilter, TimesheetFilter};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Desk API",
        version = "1.0.0",
        description = r#"
## Payroll Desk

Stateless calculation and validation service behind the payroll, timesheet and leave
data-entry grids. Every call receives the caller's working set and returns a
new one; nothing is stored server side.

### 🔹 Key Features
- **Payroll**
  - Recalculate derived pay fields for a record
  - Validate and submit a batch, with a per-row status and summary counts
  - CSV import and export, dashboard totals, search
- **Leave**
  - Submit leave rows (one leave type per row)
  - Balance summary against yearly entitlements
- **Timesheet**
  - Column totals over `HH:MM` clock values and the overtime net value
  - Per-employee weekly summary, save, CSV export

### 📦 Response Format
- JSON bodies in camelCase
- Row status is a string such as `Pending` or `Failed: Duplicate ID`
- Errors are `{ "message": ... }`

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::payroll::calculate_record,
        crate::api::payroll::submit_records,
        crate::api::payroll::import_csv,
        crate::api::payroll::export_csv,
        crate::api::payroll::payroll_stats,
        crate::api::payroll::search_records,
        crate::api::payroll::sample_records,

        crate::api::leave::submit_records,
        crate::api::leave::leave_summary,
        crate::api::leave::search_records,
        crate::api::leave::sample_records,

        crate::api::timesheet::submit_records,
        crate::api::timesheet::timesheet_totals,
        crate::api::timesheet::weekly_records,
        crate::api::timesheet::export_csv,
        crate::api::timesheet::search_records,
        crate::api::timesheet::sample_records
    ),
    components(
        schemas(
            PayrollRecord,
            PayrollField,
            PayrollSubmitResponse,
            SubmitCounts,
            ImportQuery,
            ImportResponse,
            PayrollStats,
            PayrollFilter,
            SearchResponse,
            LeaveRecord,
            LeaveField,
            LeaveKind,
            LeaveSubmitResponse,
            LeaveSummaryRequest,
            LeaveBalances,
            BalancePair,
            LeaveSummary,
            LeaveFilter,
            TimesheetRecord,
            TimesheetField,
            TimesheetStatus,
            TimesheetSubmitResponse,
            TimesheetTotals,
            EmployeeWeek,
            TimesheetFilter
        )
    ),
    tags(
        (name = "Payroll", description = "Payroll grid APIs"),
        (name = "Leave", description = "Leave grid APIs"),
        (name = "Timesheet", description = "Timesheet grid APIs"),
    )
)]
pub struct ApiDoc;

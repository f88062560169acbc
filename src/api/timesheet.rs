use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::payroll::SearchResponse;
use crate::api::today;
use crate::engine::submit::{AuditLog, SubmitCounts};
use crate::engine::timesheet::{EmployeeWeek, TimesheetTotals, submit_timesheet, weekly_summary};
use crate::error::ApiError;
use crate::model::timesheet::TimesheetRecord;
use crate::seed;
use crate::sheet::filter::TimesheetFilter;
use crate::utils::timesheet_csv::{export_file_name, export_timesheet_csv};

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetSubmitResponse {
    #[schema(example = "Successfully saved 5 timesheet entries")]
    pub message: String,
    pub records: Vec<TimesheetRecord>,
    pub counts: SubmitCounts,
}

#[utoipa::path(
    post,
    path = "/api/v1/timesheet/submit",
    request_body = [TimesheetRecord],
    responses(
        (status = 200, description = "Every entry, saved ones marked Saved", body = TimesheetSubmitResponse)
    ),
    tag = "Timesheet"
)]
pub async fn submit_records(payload: web::Json<Vec<TimesheetRecord>>) -> impl Responder {
    let outcome = submit_timesheet(&payload, &mut AuditLog);

    HttpResponse::Ok().json(TimesheetSubmitResponse {
        message: format!("Successfully saved {} timesheet entries", outcome.counts.success),
        counts: outcome.counts,
        records: outcome.records,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/timesheet/totals",
    request_body = [TimesheetRecord],
    responses(
        (status = 200, description = "Column totals in decimal hours and the net value", body = TimesheetTotals)
    ),
    tag = "Timesheet"
)]
pub async fn timesheet_totals(payload: web::Json<Vec<TimesheetRecord>>) -> impl Responder {
    HttpResponse::Ok().json(TimesheetTotals::from_records(&payload))
}

#[utoipa::path(
    post,
    path = "/api/v1/timesheet/weekly",
    request_body = [TimesheetRecord],
    responses(
        (status = 200, description = "One line per employee", body = [EmployeeWeek])
    ),
    tag = "Timesheet"
)]
pub async fn weekly_records(payload: web::Json<Vec<TimesheetRecord>>) -> impl Responder {
    HttpResponse::Ok().json(weekly_summary(&payload))
}

#[utoipa::path(
    post,
    path = "/api/v1/timesheet/export",
    request_body = [TimesheetRecord],
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String)
    ),
    tag = "Timesheet"
)]
pub async fn export_csv(payload: web::Json<Vec<TimesheetRecord>>) -> Result<impl Responder, ApiError> {
    let csv = export_timesheet_csv(&payload)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export_file_name(today())),
        ))
        .body(csv))
}

#[utoipa::path(
    post,
    path = "/api/v1/timesheet/search",
    params(TimesheetFilter),
    request_body = [TimesheetRecord],
    responses(
        (status = 200, body = SearchResponse)
    ),
    tag = "Timesheet"
)]
pub async fn search_records(
    filter: web::Query<TimesheetFilter>,
    payload: web::Json<Vec<TimesheetRecord>>,
) -> impl Responder {
    HttpResponse::Ok().json(SearchResponse { matches: filter.apply(&payload) })
}

#[utoipa::path(
    get,
    path = "/api/v1/timesheet/sample",
    responses(
        (status = 200, description = "Demo entries, all Active", body = [TimesheetRecord])
    ),
    tag = "Timesheet"
)]
pub async fn sample_records() -> impl Responder {
    HttpResponse::Ok().json(seed::sample_timesheet())
}

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::payroll::SearchResponse;
use crate::engine::leave::{LeaveBalances, LeaveSummary, submit_leave, summarize};
use crate::engine::submit::{AuditLog, SubmitCounts};
use crate::error::ApiError;
use crate::model::leave::LeaveRecord;
use crate::seed;
use crate::sheet::filter::LeaveFilter;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSubmitResponse {
    pub records: Vec<LeaveRecord>,
    pub counts: SubmitCounts,

    #[schema(example = "Success: 2, Failed: 0, Unchanged: 3, Skipped: 0")]
    pub summary: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSummaryRequest {
    pub records: Vec<LeaveRecord>,

    /// employee code to focus on; all employees when absent
    #[schema(example = "EMP001")]
    #[serde(default)]
    pub employee_id: Option<String>,

    #[serde(default)]
    pub balances: LeaveBalances,
}

#[utoipa::path(
    post,
    path = "/api/v1/leave/submit",
    request_body = [LeaveRecord],
    responses(
        (status = 200, description = "Every leave row with its new status", body = LeaveSubmitResponse)
    ),
    tag = "Leave"
)]
pub async fn submit_records(payload: web::Json<Vec<LeaveRecord>>) -> impl Responder {
    let outcome = submit_leave(&payload, &mut AuditLog);

    HttpResponse::Ok().json(LeaveSubmitResponse {
        summary: outcome.counts.to_string(),
        counts: outcome.counts,
        records: outcome.records,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/leave/summary",
    request_body = LeaveSummaryRequest,
    responses(
        (status = 200, body = LeaveSummary),
        (status = 422, description = "Negative or non-numeric balance", body = Object, example = json!({
            "message": "invalid leave balance for otherDaysEntitled: -1"
        }))
    ),
    tag = "Leave"
)]
pub async fn leave_summary(
    payload: web::Json<LeaveSummaryRequest>,
) -> Result<impl Responder, ApiError> {
    let request = payload.into_inner();
    let employee = request
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty());

    let summary = summarize(&request.records, employee, &request.balances)?;
    Ok(HttpResponse::Ok().json(summary))
}

#[utoipa::path(
    post,
    path = "/api/v1/leave/search",
    params(LeaveFilter),
    request_body = [LeaveRecord],
    responses(
        (status = 200, body = SearchResponse)
    ),
    tag = "Leave"
)]
pub async fn search_records(
    filter: web::Query<LeaveFilter>,
    payload: web::Json<Vec<LeaveRecord>>,
) -> impl Responder {
    HttpResponse::Ok().json(SearchResponse { matches: filter.apply(&payload) })
}

#[utoipa::path(
    get,
    path = "/api/v1/leave/sample",
    responses(
        (status = 200, description = "Demo leave rows, all Loaded", body = [LeaveRecord])
    ),
    tag = "Leave"
)]
pub async fn sample_records() -> impl Responder {
    HttpResponse::Ok().json(seed::sample_leave())
}

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::today;
use crate::engine::calculator;
use crate::engine::stats::PayrollStats;
use crate::engine::submit::{AuditLog, SubmitCounts, submit_payroll};
use crate::error::ApiError;
use crate::model::payroll::PayrollRecord;
use crate::seed;
use crate::sheet::filter::PayrollFilter;
use crate::utils::payroll_csv::{export_file_name, export_payroll_csv, import_payroll_csv};

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSubmitResponse {
    pub records: Vec<PayrollRecord>,
    pub counts: SubmitCounts,

    #[schema(example = "Success: 4, Failed: 1, Unchanged: 1, Skipped: 1")]
    pub summary: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ImportQuery {
    /// first id handed to rows without a usable ID column
    #[schema(example = 8)]
    pub next_id: Option<u64>,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    #[schema(example = "Imported 7 records")]
    pub message: String,
    pub records: Vec<PayrollRecord>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// indices into the submitted records, in order
    #[schema(example = json!([0, 4, 6]))]
    pub matches: Vec<usize>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll/calculate",
    request_body = PayrollRecord,
    responses(
        (status = 200, description = "Record with derived fields recalculated", body = PayrollRecord)
    ),
    tag = "Payroll"
)]
pub async fn calculate_record(payload: web::Json<PayrollRecord>) -> impl Responder {
    HttpResponse::Ok().json(calculator::calculate(&payload))
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll/submit",
    request_body = [PayrollRecord],
    responses(
        (status = 200, description = "Every record with its new status", body = PayrollSubmitResponse)
    ),
    tag = "Payroll"
)]
pub async fn submit_records(payload: web::Json<Vec<PayrollRecord>>) -> impl Responder {
    let outcome = submit_payroll(&payload, &mut AuditLog);

    HttpResponse::Ok().json(PayrollSubmitResponse {
        summary: outcome.counts.to_string(),
        counts: outcome.counts,
        records: outcome.records,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll/import",
    params(ImportQuery),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Parsed rows, all Pending", body = ImportResponse),
        (status = 400, description = "Unreadable or empty file", body = Object, example = json!({
            "message": "no payroll rows found in file"
        }))
    ),
    tag = "Payroll"
)]
pub async fn import_csv(
    query: web::Query<ImportQuery>,
    body: String,
) -> Result<impl Responder, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("CSV body is empty".into()));
    }

    let records = import_payroll_csv(&body, query.next_id.unwrap_or(1), today())?;

    Ok(HttpResponse::Ok().json(ImportResponse {
        message: format!("Imported {} records", records.len()),
        records,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll/export",
    request_body = [PayrollRecord],
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String)
    ),
    tag = "Payroll"
)]
pub async fn export_csv(payload: web::Json<Vec<PayrollRecord>>) -> Result<impl Responder, ApiError> {
    let csv = export_payroll_csv(&payload)?;
    let file_name = export_file_name(today());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(csv))
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll/stats",
    request_body = [PayrollRecord],
    responses(
        (status = 200, body = PayrollStats)
    ),
    tag = "Payroll"
)]
pub async fn payroll_stats(payload: web::Json<Vec<PayrollRecord>>) -> impl Responder {
    HttpResponse::Ok().json(PayrollStats::from_records(&payload))
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll/search",
    params(PayrollFilter),
    request_body = [PayrollRecord],
    responses(
        (status = 200, body = SearchResponse)
    ),
    tag = "Payroll"
)]
pub async fn search_records(
    filter: web::Query<PayrollFilter>,
    payload: web::Json<Vec<PayrollRecord>>,
) -> impl Responder {
    HttpResponse::Ok().json(SearchResponse { matches: filter.apply(&payload) })
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/sample",
    responses(
        (status = 200, description = "Demo dataset, all Loaded", body = [PayrollRecord])
    ),
    tag = "Payroll"
)]
pub async fn sample_records() -> impl Responder {
    HttpResponse::Ok().json(seed::sample_payroll())
}

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::engine::leave::LeaveError;
use crate::utils::payroll_csv::CsvError;

/// Errors surfaced by the HTTP handlers. Per-row failures never end up here;
/// they travel inside each record's status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Leave(#[from] LeaveError),

    #[error("{0}")]
    BadRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Csv(CsvError::Output(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Csv(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Leave(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self, status = self.status_code().as_u16(), "request failed");
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}

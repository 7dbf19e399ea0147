use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::PaymentStatus;
use crate::services::PaymentError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Payment rejected")]
    Rejected(Vec<ValidationError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payment processing failed: {0}")]
    BankUnavailable(String),

    #[error("Payment processing failed: {0}")]
    BankFailure(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Rejected(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BankUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BankFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Rejected(errors) => AppError::Rejected(errors),
            PaymentError::Bank(e) if e.is_unavailable() => AppError::BankUnavailable(e.to_string()),
            PaymentError::Bank(e) => AppError::BankFailure(e.to_string()),
            PaymentError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Rejected(errors) => Json(json!({
                "error": PaymentStatus::Rejected.as_str(),
                "errors": errors,
            })),
            other => Json(json!({
                "error": other.to_string(),
                "status": status.as_u16(),
            })),
        };

        (status, body).into_response()
    }
}

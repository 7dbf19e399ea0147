use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::domain::PaymentRequest;
use crate::error::AppError;
use crate::AppState;

pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed payment body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let payment = state.payment_service.create_payment(request).await?;

    Ok((StatusCode::OK, Json(payment)))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if Uuid::parse_str(&id).is_err() {
        return Err(AppError::BadRequest(format!("Invalid payment id: {}", id)));
    }

    let payment = state
        .payment_service
        .get_payment(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {} not found", id)))?;

    Ok(Json(payment))
}

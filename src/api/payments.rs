use axum::{Json, body::Bytes, extract::State};
use std::sync::Arc;

use super::hotels::parse_body;
use super::{ApiError, ApiResponse, AppState};
use crate::models::{Payment, PaymentRequest};

pub async fn process_payment(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let request: PaymentRequest = parse_body(&body)?;
    let payment = state.shared.payments.process(request)?;
    Ok(Json(ApiResponse::success_with_message(
        payment,
        "Payment processed successfully",
    )))
}

// handlers/payment_handlers.rs
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;
use validator::Validate;

use crate::dtos::payment_dtos::{
    InitiatePaymentRequest, InitiatePaymentResponse, PaymentStatusResponse, WebhookNotification,
};
use crate::errors::Result;
use crate::services::initiator::NewPayment;
use crate::state::AppState;

pub async fn initiate_payment(
    State(state): State<AppState>,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<Json<InitiatePaymentResponse>> {
    request.validate()?;

    let initiated = state
        .initiator
        .initiate(NewPayment {
            amount: request.amount,
            customer: request.customer.into(),
            description: request.description,
            vendor_id: request.vendor_id,
            order_id: request.order_id,
            metadata: request.metadata,
        })
        .await?;

    Ok(Json(InitiatePaymentResponse {
        success: true,
        reference: initiated.reference,
        payment_url: initiated.payment_url,
    }))
}

/// Gateway webhook. Runs the same verify-and-settle path as the status
/// endpoint; a non-2xx answer makes the gateway redeliver, which the
/// reconciler's guard makes safe.
pub async fn payment_webhook(
    State(state): State<AppState>,
    Json(notification): Json<WebhookNotification>,
) -> Result<Json<serde_json::Value>> {
    info!("Webhook received for {}", notification.reference);

    let status = state.reconciler.verify(&notification.reference).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "reference": notification.reference,
        "status": status.as_str(),
    })))
}

pub async fn check_payment_status(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<PaymentStatusResponse>> {
    let status = state.reconciler.verify(&reference).await?;

    Ok(Json(PaymentStatusResponse {
        reference,
        status: status.as_str().to_string(),
    }))
}

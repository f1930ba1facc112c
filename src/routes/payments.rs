use axum::{
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use crate::handlers::payment_handlers;
use crate::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(payments_health))
        .route("/initiate", post(payment_handlers::initiate_payment))
        .route("/webhook", post(payment_handlers::payment_webhook))
        .route(
            "/:reference/status",
            get(payment_handlers::check_payment_status),
        )
}

async fn payments_health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "payments",
        "timestamp": Utc::now().to_rfc3339(),
        "features": ["initiate", "webhook", "status-check", "split-settlement"]
    }))
}

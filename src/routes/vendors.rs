use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::vendor_handlers;
use crate::state::AppState;

pub fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:vendor_id/transactions",
            get(vendor_handlers::get_vendor_transactions),
        )
        .route(
            "/:vendor_id/earnings",
            get(vendor_handlers::get_vendor_earnings),
        )
        .route(
            "/:vendor_id/payouts",
            get(vendor_handlers::get_vendor_payouts),
        )
        .route("/:vendor_id/onboard", post(vendor_handlers::onboard_vendor))
}

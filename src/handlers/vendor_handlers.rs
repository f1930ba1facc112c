// handlers/vendor_handlers.rs
use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::dtos::vendor_dtos::OnboardVendorResponse;
use crate::errors::Result;
use crate::models::earning::VendorEarning;
use crate::models::payout::VendorPayout;
use crate::models::transaction::Transaction;
use crate::state::AppState;

// Newest-first pass-through reads.

pub async fn get_vendor_transactions(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> Result<Json<Vec<Transaction>>> {
    let transactions = state.store.transactions_for_vendor(&vendor_id).await?;
    Ok(Json(transactions))
}

pub async fn get_vendor_earnings(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> Result<Json<Vec<VendorEarning>>> {
    let earnings = state.store.earnings_for_vendor(&vendor_id).await?;
    Ok(Json(earnings))
}

pub async fn get_vendor_payouts(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> Result<Json<Vec<VendorPayout>>> {
    let payouts = state.store.payouts_for_vendor(&vendor_id).await?;
    Ok(Json(payouts))
}

pub async fn onboard_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> Result<Json<OnboardVendorResponse>> {
    let settlement_identity = state.onboarding.register(&vendor_id).await?;
    Ok(Json(OnboardVendorResponse {
        success: true,
        vendor_id,
        settlement_identity,
    }))
}

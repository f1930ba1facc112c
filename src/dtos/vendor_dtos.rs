// dtos/vendor_dtos.rs
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OnboardVendorResponse {
    pub success: bool,
    pub vendor_id: String,
    pub settlement_identity: String,
}

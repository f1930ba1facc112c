// dtos/payment_dtos.rs
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::transaction::Customer;

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerDto {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub address: Option<String>,
}

impl From<CustomerDto> for Customer {
    fn from(dto: CustomerDto) -> Self {
        Customer {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            address: dto.address,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct InitiatePaymentRequest {
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(nested)]
    pub customer: CustomerDto,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub vendor_id: String,
    pub order_id: Option<String>,
    pub metadata: Option<Document>,
}

#[derive(Debug, Serialize)]
pub struct InitiatePaymentResponse {
    pub success: bool,
    pub reference: String,
    pub payment_url: String,
}

/// Body the gateway POSTs to the notify URL.
#[derive(Debug, Deserialize)]
pub struct WebhookNotification {
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentStatusResponse {
    pub reference: String,
    pub status: String,
}

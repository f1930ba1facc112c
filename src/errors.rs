// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Gateway initiation failed: {0}")]
    GatewayInitiation(String),

    #[error("Gateway verification failed: {0}")]
    GatewayVerification(String),

    #[error("Vendor lookup failed: {0}")]
    VendorLookup(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Invalid transaction state: {0}")]
    InvalidTransactionState(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MongoDB(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_string()),
            AppError::GatewayInitiation(_) => (StatusCode::BAD_GATEWAY, "Payment initiation failed".to_string()),
            AppError::GatewayVerification(_) => (StatusCode::BAD_GATEWAY, "Payment verification failed".to_string()),
            AppError::VendorLookup(_) => (StatusCode::BAD_GATEWAY, "Vendor lookup failed".to_string()),
            AppError::TransactionNotFound(_) => (StatusCode::NOT_FOUND, "Transaction not found".to_string()),
            AppError::InvalidTransactionState(_) => (StatusCode::CONFLICT, "Invalid transaction state".to_string()),
            AppError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Persistence error".to_string()),
            AppError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

// Helper conversion functions
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn gateway_initiation(msg: impl Into<String>) -> Self {
        AppError::GatewayInitiation(msg.into())
    }

    pub fn gateway_verification(msg: impl Into<String>) -> Self {
        AppError::GatewayVerification(msg.into())
    }

    pub fn vendor_lookup(msg: impl Into<String>) -> Self {
        AppError::VendorLookup(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        AppError::Persistence(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

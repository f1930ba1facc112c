// services/gateway.rs
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::transaction::Customer;

/// One leg of a split payment. The gateway routes `amount` directly to the
/// named merchant; the legs of a request must sum to the charged amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitInstruction {
    pub merchant: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    pub customer: Customer,
    pub description: String,
    pub notify_url: String,
    pub return_url: String,
    pub channel: String,
    pub splits: Vec<SplitInstruction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitiationOutcome {
    pub status_code: i64,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InitiationOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationOutcome {
    /// Gateway vocabulary: ACCEPTED, REFUSED, CANCELLED, or an in-flight
    /// status such as PENDING.
    pub status: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate(&self, request: &PaymentRequest) -> Result<InitiationOutcome>;
    async fn verify(&self, reference: &str) -> Result<VerificationOutcome>;
}

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    api_key: String,
    initiate_url: String,
    verify_base_url: String,
}

// Retries are limited to connect-phase failures, where the request never
// reached the gateway. A timeout after the request was sent is ambiguous
// (the charge may have gone through) and is surfaced to the caller instead.
const MAX_RETRIES: u32 = 2;

impl HttpGateway {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let (initiate_url, verify_base_url) = config.gateway_urls();

        HttpGateway {
            client,
            api_key: config.gateway_api_key.clone(),
            initiate_url,
            verify_base_url,
        }
    }

    async fn post_initiate(&self, request: &PaymentRequest) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&self.initiate_url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
    }

    async fn get_verify(&self, reference: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(format!("{}/{}/verify", self.verify_base_url, reference))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn initiate(&self, request: &PaymentRequest) -> Result<InitiationOutcome> {
        info!(
            "Initiating payment {} for {} {}",
            request.reference, request.amount, request.currency
        );

        let mut attempt = 0;
        let response = loop {
            match self.post_initiate(request).await {
                Ok(response) => break response,
                Err(e) if e.is_connect() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    warn!(
                        "Gateway connect failed for {} (attempt {}): {}",
                        request.reference, attempt, e
                    );
                    tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
                }
                Err(e) => {
                    error!("Gateway initiation failed for {}: {}", request.reference, e);
                    return Err(AppError::gateway_initiation(e.to_string()));
                }
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Gateway initiation rejected: {} - {}", status, body);
            return Err(AppError::gateway_initiation(format!(
                "gateway returned {}",
                status
            )));
        }

        let outcome: InitiationOutcome = response
            .json()
            .await
            .map_err(|e| AppError::gateway_initiation(e.to_string()))?;
        info!(
            "Gateway answered {} for {}",
            outcome.status_code, request.reference
        );
        Ok(outcome)
    }

    async fn verify(&self, reference: &str) -> Result<VerificationOutcome> {
        let mut attempt = 0;
        let response = loop {
            match self.get_verify(reference).await {
                Ok(response) => break response,
                Err(e) if e.is_connect() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    warn!(
                        "Gateway connect failed verifying {} (attempt {}): {}",
                        reference, attempt, e
                    );
                    tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
                }
                Err(e) => {
                    error!("Gateway verification failed for {}: {}", reference, e);
                    return Err(AppError::gateway_verification(e.to_string()));
                }
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Gateway verification rejected: {} - {}", status, body);
            return Err(AppError::gateway_verification(format!(
                "gateway returned {}",
                status
            )));
        }

        let outcome: VerificationOutcome = response
            .json()
            .await
            .map_err(|e| AppError::gateway_verification(e.to_string()))?;
        info!("Gateway status for {}: {}", reference, outcome.status);
        Ok(outcome)
    }
}

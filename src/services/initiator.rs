// services/initiator.rs
use chrono::Utc;
use mongodb::bson::Document;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::transaction::{Customer, Transaction, TransactionStatus};
use crate::services::commission;
use crate::services::gateway::{PaymentGateway, PaymentRequest, SplitInstruction};
use crate::services::store::SettlementStore;
use crate::services::vendor_directory::VendorSettlementResolver;

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub amount: i64,
    pub customer: Customer,
    pub description: String,
    pub vendor_id: String,
    pub order_id: Option<String>,
    pub metadata: Option<Document>,
}

#[derive(Debug, Clone)]
pub struct InitiatedPayment {
    pub reference: String,
    pub payment_url: String,
}

/// Starts a payment: computes the commission split, records a pending
/// transaction, then asks the gateway for a payment link. The pending record
/// is written before the gateway call so a gateway failure always leaves an
/// auditable trail.
pub struct PaymentInitiator {
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn SettlementStore>,
    resolver: VendorSettlementResolver,
    platform_identity: String,
    currency: String,
    notify_url: String,
    return_url: String,
    channel: String,
}

impl PaymentInitiator {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn SettlementStore>,
        resolver: VendorSettlementResolver,
        config: &AppConfig,
    ) -> Self {
        PaymentInitiator {
            gateway,
            store,
            resolver,
            platform_identity: config.platform_merchant_id.clone(),
            currency: config.currency.clone(),
            notify_url: config.gateway_notify_url.clone(),
            return_url: config.gateway_return_url.clone(),
            channel: config.payment_channel.clone(),
        }
    }

    pub async fn initiate(&self, payment: NewPayment) -> Result<InitiatedPayment> {
        Self::validate(&payment)?;

        let reference = format!("PAY-{}", Uuid::new_v4().simple().to_string().to_uppercase());
        let split = commission::split(payment.amount);
        let route = self.resolver.resolve(&payment.vendor_id).await;

        let now = Utc::now();
        let tx = Transaction {
            id: None,
            reference: reference.clone(),
            amount: payment.amount,
            currency: self.currency.clone(),
            commission: split.commission,
            vendor_amount: split.vendor_amount,
            vendor_id: payment.vendor_id.clone(),
            settlement_identity: route.identity.clone(),
            direct_settlement: route.direct,
            customer: payment.customer.clone(),
            description: payment.description.clone(),
            order_id: payment.order_id.clone(),
            status: TransactionStatus::Pending,
            payment_link: None,
            metadata: payment.metadata.clone(),
            created_at: now,
            updated_at: now,
        };

        // Fail closed: no gateway call without a durable local record.
        self.store.create_transaction(&tx).await?;
        info!(
            "Recorded pending transaction {} (amount {}, commission {}, vendor {})",
            reference, payment.amount, split.commission, payment.vendor_id
        );

        let request = PaymentRequest {
            reference: reference.clone(),
            amount: payment.amount,
            currency: self.currency.clone(),
            customer: payment.customer,
            description: payment.description,
            notify_url: self.notify_url.clone(),
            return_url: self.return_url.clone(),
            channel: self.channel.clone(),
            splits: vec![
                SplitInstruction {
                    merchant: self.platform_identity.clone(),
                    amount: split.commission,
                },
                SplitInstruction {
                    merchant: route.identity,
                    amount: split.vendor_amount,
                },
            ],
        };

        let outcome = self.gateway.initiate(&request).await?;
        if !outcome.is_success() {
            // The transaction stays pending for a later manual retry.
            error!(
                "Gateway refused initiation of {}: {} {}",
                reference,
                outcome.status_code,
                outcome.message.as_deref().unwrap_or("")
            );
            return Err(AppError::gateway_initiation(format!(
                "gateway answered {}",
                outcome.status_code
            )));
        }

        let payment_url = outcome.payment_url.ok_or_else(|| {
            AppError::gateway_initiation("gateway omitted the payment URL".to_string())
        })?;
        self.store
            .attach_payment_link(&reference, &payment_url)
            .await?;

        info!("Payment {} initiated, link ready", reference);
        Ok(InitiatedPayment {
            reference,
            payment_url,
        })
    }

    fn validate(payment: &NewPayment) -> Result<()> {
        if payment.amount <= 0 {
            return Err(AppError::validation("amount must be greater than 0"));
        }
        if payment.vendor_id.trim().is_empty() {
            return Err(AppError::validation("vendor_id must not be empty"));
        }
        let c = &payment.customer;
        if c.id.trim().is_empty() || c.name.trim().is_empty() || c.phone.trim().is_empty() {
            return Err(AppError::validation(
                "customer id, name and phone are required",
            ));
        }
        if !c.email.contains('@') {
            return Err(AppError::validation("customer email is invalid"));
        }
        Ok(())
    }
}

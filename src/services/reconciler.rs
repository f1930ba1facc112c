// services/reconciler.rs
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::errors::{AppError, Result};
use crate::models::earning::{EarningStatus, VendorEarning};
use crate::models::payout::{PayoutStatus, VendorPayout};
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::models::vendor::PayoutFrequency;
use crate::services::gateway::PaymentGateway;
use crate::services::payout_schedule::next_payout_date;
use crate::services::store::SettlementStore;
use crate::services::vendor_directory::VendorDirectory;

/// Records a vendor's net earning line for a settled transaction.
pub struct EarningsLedger {
    store: Arc<dyn SettlementStore>,
}

impl EarningsLedger {
    pub fn new(store: Arc<dyn SettlementStore>) -> Self {
        EarningsLedger { store }
    }

    pub async fn record(&self, tx: &Transaction) -> Result<()> {
        if tx.status != TransactionStatus::Successful {
            return Err(AppError::InvalidTransactionState(format!(
                "cannot record earnings for a {} transaction",
                tx.status.as_str()
            )));
        }

        let earning = VendorEarning {
            id: None,
            vendor_id: tx.vendor_id.clone(),
            transaction_reference: tx.reference.clone(),
            order_id: tx.order_id.clone().unwrap_or_else(|| tx.reference.clone()),
            amount: tx.vendor_amount,
            commission: tx.commission,
            status: EarningStatus::Pending,
            created_at: Utc::now(),
        };
        self.store.record_earning(&earning).await?;
        info!(
            "Recorded earning of {} for vendor {} on {}",
            tx.vendor_amount, tx.vendor_id, tx.reference
        );
        Ok(())
    }
}

/// Schedules a payout for the vendor's share when the gateway did not route
/// it directly at initiation.
pub struct PayoutScheduler {
    store: Arc<dyn SettlementStore>,
    vendors: Arc<dyn VendorDirectory>,
}

impl PayoutScheduler {
    pub fn new(store: Arc<dyn SettlementStore>, vendors: Arc<dyn VendorDirectory>) -> Self {
        PayoutScheduler { store, vendors }
    }

    pub async fn schedule(&self, tx: &Transaction) -> Result<()> {
        if tx.direct_settlement {
            info!(
                "Vendor {} settles directly, no payout for {}",
                tx.vendor_id, tx.reference
            );
            return Ok(());
        }

        let frequency = match self.vendors.payout_frequency(&tx.vendor_id).await {
            Ok(Some(frequency)) => frequency,
            Ok(None) => {
                warn!(
                    "Vendor {} has no payout frequency on file, defaulting to monthly",
                    tx.vendor_id
                );
                PayoutFrequency::Monthly
            }
            Err(e) => {
                warn!(
                    "Payout frequency lookup failed for {} ({}), defaulting to monthly",
                    tx.vendor_id, e
                );
                PayoutFrequency::Monthly
            }
        };

        let today = Utc::now().date_naive();
        let payout = VendorPayout {
            id: None,
            vendor_id: tx.vendor_id.clone(),
            transaction_reference: tx.reference.clone(),
            amount: tx.vendor_amount,
            status: PayoutStatus::Pending,
            scheduled_date: next_payout_date(frequency, today),
            created_at: Utc::now(),
        };
        self.store.create_payout(&payout).await?;
        info!(
            "Scheduled payout of {} to vendor {} on {}",
            payout.amount, payout.vendor_id, payout.scheduled_date
        );
        Ok(())
    }
}

// The gateway has already settled the money once a definitive status comes
// back, so the local writes that record it are retried before giving up.
const STORE_RETRIES: u32 = 4;

/// Reconciles a transaction's final outcome against the gateway and, on the
/// first successful resolution, fans out to the earnings ledger and the
/// payout scheduler. Safe to call any number of times for one reference.
pub struct StatusReconciler {
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn SettlementStore>,
    ledger: EarningsLedger,
    scheduler: PayoutScheduler,
}

impl StatusReconciler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn SettlementStore>,
        ledger: EarningsLedger,
        scheduler: PayoutScheduler,
    ) -> Self {
        StatusReconciler {
            gateway,
            store,
            ledger,
            scheduler,
        }
    }

    /// Maps the gateway's vocabulary onto the internal lifecycle. Anything
    /// unrecognized is treated as still in flight.
    fn map_external(status: &str) -> TransactionStatus {
        match status {
            "ACCEPTED" => TransactionStatus::Successful,
            "REFUSED" => TransactionStatus::Failed,
            "CANCELLED" => TransactionStatus::Cancelled,
            _ => TransactionStatus::Pending,
        }
    }

    pub async fn verify(&self, reference: &str) -> Result<TransactionStatus> {
        let tx = self
            .store
            .transaction_by_reference(reference)
            .await?
            .ok_or_else(|| AppError::TransactionNotFound(reference.to_string()))?;

        if tx.status.is_terminal() {
            info!(
                "Transaction {} already resolved as {}",
                reference,
                tx.status.as_str()
            );
            return Ok(tx.status);
        }

        let verdict = self.gateway.verify(reference).await?;
        let mapped = Self::map_external(&verdict.status);
        if mapped == TransactionStatus::Pending {
            return Ok(TransactionStatus::Pending);
        }

        let won = self.resolve_durably(reference, mapped).await?;
        let Some(resolved) = won else {
            // Another verifier already resolved this transaction; report the
            // persisted status and do nothing else.
            let current = self
                .store
                .transaction_by_reference(reference)
                .await?
                .ok_or_else(|| AppError::TransactionNotFound(reference.to_string()))?;
            info!(
                "Transaction {} resolved concurrently as {}",
                reference,
                current.status.as_str()
            );
            return Ok(current.status);
        };

        info!("Transaction {} resolved as {}", reference, mapped.as_str());
        if mapped == TransactionStatus::Successful {
            self.settle_durably(&resolved).await?;
        }
        Ok(mapped)
    }

    async fn resolve_durably(
        &self,
        reference: &str,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>> {
        let mut attempt = 0;
        loop {
            match self.store.resolve_status(reference, status).await {
                Ok(updated) => return Ok(updated),
                Err(e) if attempt < STORE_RETRIES => {
                    attempt += 1;
                    error!(
                        "Status update for {} failed (attempt {}): {}",
                        reference, attempt, e
                    );
                    tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                }
                Err(e) => {
                    error!(
                        "Status update for {} still failing after {} attempts, giving up",
                        reference, STORE_RETRIES
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn settle_durably(&self, tx: &Transaction) -> Result<()> {
        let mut attempt = 0;
        loop {
            match self.ledger.record(tx).await {
                Ok(()) => break,
                Err(e @ AppError::InvalidTransactionState(_)) => return Err(e),
                Err(e) if attempt < STORE_RETRIES => {
                    attempt += 1;
                    error!(
                        "Earning write for {} failed (attempt {}): {}",
                        tx.reference, attempt, e
                    );
                    tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e),
            }
        }

        let mut attempt = 0;
        loop {
            match self.scheduler.schedule(tx).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < STORE_RETRIES => {
                    attempt += 1;
                    error!(
                        "Payout write for {} failed (attempt {}): {}",
                        tx.reference, attempt, e
                    );
                    tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

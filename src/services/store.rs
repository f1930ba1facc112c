// services/store.rs
use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::doc,
    options::ReturnDocument,
    Collection, Database,
};

use crate::errors::Result;
use crate::models::earning::VendorEarning;
use crate::models::payout::VendorPayout;
use crate::models::transaction::{Transaction, TransactionStatus};

/// Durable records behind the settlement engine. The status transition is a
/// conditional update so that concurrent verifiers race in the database, not
/// in process memory.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    async fn create_transaction(&self, tx: &Transaction) -> Result<()>;
    async fn transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>>;
    async fn attach_payment_link(&self, reference: &str, link: &str) -> Result<()>;

    /// Compare-and-set `pending` → `status`. Returns the updated transaction
    /// when this caller won the transition, `None` when the transaction was
    /// already terminal.
    async fn resolve_status(
        &self,
        reference: &str,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>>;

    async fn record_earning(&self, earning: &VendorEarning) -> Result<()>;
    async fn create_payout(&self, payout: &VendorPayout) -> Result<()>;

    async fn transactions_for_vendor(&self, vendor_id: &str) -> Result<Vec<Transaction>>;
    async fn earnings_for_vendor(&self, vendor_id: &str) -> Result<Vec<VendorEarning>>;
    async fn payouts_for_vendor(&self, vendor_id: &str) -> Result<Vec<VendorPayout>>;
}

#[derive(Clone)]
pub struct MongoSettlementStore {
    db: Database,
}

impl MongoSettlementStore {
    pub fn new(db: Database) -> Self {
        MongoSettlementStore { db }
    }

    fn transactions(&self) -> Collection<Transaction> {
        self.db.collection("transactions")
    }

    fn earnings(&self) -> Collection<VendorEarning> {
        self.db.collection("vendor_earnings")
    }

    fn payouts(&self) -> Collection<VendorPayout> {
        self.db.collection("vendor_payouts")
    }
}

#[async_trait]
impl SettlementStore for MongoSettlementStore {
    async fn create_transaction(&self, tx: &Transaction) -> Result<()> {
        self.transactions().insert_one(tx).await?;
        Ok(())
    }

    async fn transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        let tx = self
            .transactions()
            .find_one(doc! { "reference": reference })
            .await?;
        Ok(tx)
    }

    async fn attach_payment_link(&self, reference: &str, link: &str) -> Result<()> {
        self.transactions()
            .update_one(
                doc! { "reference": reference },
                doc! { "$set": {
                    "payment_link": link,
                    "updated_at": Utc::now().to_rfc3339(),
                }},
            )
            .await?;
        Ok(())
    }

    async fn resolve_status(
        &self,
        reference: &str,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>> {
        let updated = self
            .transactions()
            .find_one_and_update(
                doc! {
                    "reference": reference,
                    "status": TransactionStatus::Pending.as_str(),
                },
                doc! { "$set": {
                    "status": status.as_str(),
                    "updated_at": Utc::now().to_rfc3339(),
                }},
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn record_earning(&self, earning: &VendorEarning) -> Result<()> {
        self.earnings().insert_one(earning).await?;
        Ok(())
    }

    async fn create_payout(&self, payout: &VendorPayout) -> Result<()> {
        self.payouts().insert_one(payout).await?;
        Ok(())
    }

    async fn transactions_for_vendor(&self, vendor_id: &str) -> Result<Vec<Transaction>> {
        let cursor = self
            .transactions()
            .find(doc! { "vendor_id": vendor_id })
            .await?;
        let mut txs: Vec<Transaction> = cursor.try_collect().await?;
        txs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(txs)
    }

    async fn earnings_for_vendor(&self, vendor_id: &str) -> Result<Vec<VendorEarning>> {
        let cursor = self.earnings().find(doc! { "vendor_id": vendor_id }).await?;
        let mut earnings: Vec<VendorEarning> = cursor.try_collect().await?;
        earnings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(earnings)
    }

    async fn payouts_for_vendor(&self, vendor_id: &str) -> Result<Vec<VendorPayout>> {
        let cursor = self.payouts().find(doc! { "vendor_id": vendor_id }).await?;
        let mut payouts: Vec<VendorPayout> = cursor.try_collect().await?;
        payouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payouts)
    }
}

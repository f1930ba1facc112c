// models/transaction.rs
use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Lifecycle of a checkout transaction. `Pending` is the only non-terminal
/// state; a transaction that reaches a terminal state never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Successful,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Successful => "successful",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Globally unique payment reference; the key the gateway echoes back.
    pub reference: String,

    // Amounts are whole XAF. Invariant: commission + vendor_amount == amount.
    pub amount: i64,
    pub currency: String,
    pub commission: i64,
    pub vendor_amount: i64,

    pub vendor_id: String,
    /// Merchant identity the vendor share was routed to at initiation, and
    /// whether that routing was direct to the vendor. The payout decision
    /// follows where the money actually went, not the vendor's current
    /// directory entry.
    pub settlement_identity: String,
    pub direct_settlement: bool,

    pub customer: Customer,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Document>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

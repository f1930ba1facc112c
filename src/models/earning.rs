// models/earning.rs
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarningStatus {
    Pending,
    Paid,
}

/// One net-earning line per successfully settled transaction. Write-once;
/// payout execution owns any later status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorEarning {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub vendor_id: String,
    pub transaction_reference: String,
    pub order_id: String,

    /// Equals the transaction's vendor_amount, in whole XAF.
    pub amount: i64,
    pub commission: i64,

    pub status: EarningStatus,
    pub created_at: DateTime<Utc>,
}

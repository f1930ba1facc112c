// models/payout.rs
use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// A scheduled transfer of a vendor's share, created only for vendors
/// without a direct settlement identity. At most one per settled transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorPayout {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub vendor_id: String,
    pub transaction_reference: String,

    pub amount: i64,
    pub status: PayoutStatus,
    pub scheduled_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

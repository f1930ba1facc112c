// models/vendor.rs
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub vendor_id: String,
    pub business_name: String,

    /// Merchant identity registered with the gateway. When present the
    /// gateway routes the vendor's share directly and no payout is scheduled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_identity: Option<String>,

    pub payout_frequency: PayoutFrequency,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

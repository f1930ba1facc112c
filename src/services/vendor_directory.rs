// services/vendor_directory.rs
use async_trait::async_trait;
use chrono::Utc;
use mongodb::{bson::doc, Collection, Database};
use tracing::warn;

use crate::errors::Result;
use crate::models::vendor::{PayoutFrequency, Vendor};

#[async_trait]
pub trait VendorDirectory: Send + Sync {
    async fn settlement_identity(&self, vendor_id: &str) -> Result<Option<String>>;
    async fn payout_frequency(&self, vendor_id: &str) -> Result<Option<PayoutFrequency>>;
    async fn assign_settlement_identity(&self, vendor_id: &str, identity: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct MongoVendorDirectory {
    db: Database,
}

impl MongoVendorDirectory {
    pub fn new(db: Database) -> Self {
        MongoVendorDirectory { db }
    }

    fn vendors(&self) -> Collection<Vendor> {
        self.db.collection("vendors")
    }
}

#[async_trait]
impl VendorDirectory for MongoVendorDirectory {
    async fn settlement_identity(&self, vendor_id: &str) -> Result<Option<String>> {
        let vendor = self.vendors().find_one(doc! { "vendor_id": vendor_id }).await?;
        Ok(vendor.and_then(|v| v.settlement_identity))
    }

    async fn payout_frequency(&self, vendor_id: &str) -> Result<Option<PayoutFrequency>> {
        let vendor = self.vendors().find_one(doc! { "vendor_id": vendor_id }).await?;
        Ok(vendor.map(|v| v.payout_frequency))
    }

    async fn assign_settlement_identity(&self, vendor_id: &str, identity: &str) -> Result<()> {
        self.vendors()
            .update_one(
                doc! { "vendor_id": vendor_id },
                doc! { "$set": {
                    "settlement_identity": identity,
                    "updated_at": Utc::now().to_rfc3339(),
                }},
            )
            .await?;
        Ok(())
    }
}

/// Where a transaction's vendor share should be routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRoute {
    pub identity: String,
    /// True when the identity belongs to the vendor and the gateway settles
    /// the share directly; false when the platform holds the funds and a
    /// payout must be scheduled later.
    pub direct: bool,
}

#[derive(Clone)]
pub struct VendorSettlementResolver {
    vendors: std::sync::Arc<dyn VendorDirectory>,
    platform_identity: String,
}

impl VendorSettlementResolver {
    pub fn new(vendors: std::sync::Arc<dyn VendorDirectory>, platform_identity: String) -> Self {
        VendorSettlementResolver {
            vendors,
            platform_identity,
        }
    }

    /// Resolves the vendor's settlement identity, falling back to the
    /// platform identity when the vendor has none or the lookup fails.
    /// Payment must proceed either way; the fallback is logged, not silent.
    pub async fn resolve(&self, vendor_id: &str) -> SettlementRoute {
        match self.vendors.settlement_identity(vendor_id).await {
            Ok(Some(identity)) => SettlementRoute {
                identity,
                direct: true,
            },
            Ok(None) => {
                warn!(
                    "Vendor {} has no settlement identity, routing through the platform",
                    vendor_id
                );
                SettlementRoute {
                    identity: self.platform_identity.clone(),
                    direct: false,
                }
            }
            Err(e) => {
                warn!(
                    "Vendor lookup failed for {} ({}), routing through the platform",
                    vendor_id, e
                );
                SettlementRoute {
                    identity: self.platform_identity.clone(),
                    direct: false,
                }
            }
        }
    }
}

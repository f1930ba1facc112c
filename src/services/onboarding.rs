// services/onboarding.rs
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::errors::Result;
use crate::services::vendor_directory::VendorDirectory;

/// Assigns a vendor a settlement identity with the gateway.
///
/// This synthesizes the identity locally instead of calling the gateway's
/// merchant-provisioning API; the generated value is a placeholder until
/// that integration lands.
pub struct VendorOnboarding {
    vendors: Arc<dyn VendorDirectory>,
}

impl VendorOnboarding {
    pub fn new(vendors: Arc<dyn VendorDirectory>) -> Self {
        VendorOnboarding { vendors }
    }

    pub async fn register(&self, vendor_id: &str) -> Result<String> {
        let identity = format!("MCH-{}", Uuid::new_v4().simple());
        self.vendors
            .assign_settlement_identity(vendor_id, &identity)
            .await?;
        info!("Assigned settlement identity {} to vendor {}", identity, vendor_id);
        Ok(identity)
    }
}

use mongodb::Database;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::gateway::HttpGateway;
use crate::services::initiator::PaymentInitiator;
use crate::services::onboarding::VendorOnboarding;
use crate::services::reconciler::{EarningsLedger, PayoutScheduler, StatusReconciler};
use crate::services::store::{MongoSettlementStore, SettlementStore};
use crate::services::vendor_directory::{
    MongoVendorDirectory, VendorDirectory, VendorSettlementResolver,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SettlementStore>,
    pub initiator: Arc<PaymentInitiator>,
    pub reconciler: Arc<StatusReconciler>,
    pub onboarding: Arc<VendorOnboarding>,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        let store: Arc<dyn SettlementStore> = Arc::new(MongoSettlementStore::new(db.clone()));
        let vendors: Arc<dyn VendorDirectory> = Arc::new(MongoVendorDirectory::new(db));
        let gateway = Arc::new(HttpGateway::new(config));

        let resolver =
            VendorSettlementResolver::new(vendors.clone(), config.platform_merchant_id.clone());
        let initiator = Arc::new(PaymentInitiator::new(
            gateway.clone(),
            store.clone(),
            resolver,
            config,
        ));
        let reconciler = Arc::new(StatusReconciler::new(
            gateway,
            store.clone(),
            EarningsLedger::new(store.clone()),
            PayoutScheduler::new(store.clone(), vendors.clone()),
        ));
        let onboarding = Arc::new(VendorOnboarding::new(vendors));

        AppState {
            store,
            initiator,
            reconciler,
            onboarding,
        }
    }
}

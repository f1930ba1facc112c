#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use marketpay::config::AppConfig;
use marketpay::errors::{AppError, Result};
use marketpay::models::earning::VendorEarning;
use marketpay::models::payout::VendorPayout;
use marketpay::models::transaction::{Customer, Transaction, TransactionStatus};
use marketpay::models::vendor::PayoutFrequency;
use marketpay::services::gateway::{
    InitiationOutcome, PaymentGateway, PaymentRequest, VerificationOutcome,
};
use marketpay::services::initiator::{NewPayment, PaymentInitiator};
use marketpay::services::reconciler::{EarningsLedger, PayoutScheduler, StatusReconciler};
use marketpay::services::store::SettlementStore;
use marketpay::services::vendor_directory::{VendorDirectory, VendorSettlementResolver};

pub const PLATFORM_ID: &str = "PLATFORM-001";

// ---------------------------------------------------------------------------
// In-memory settlement store with the same compare-and-set semantics as the
// MongoDB implementation. All mutation happens under one lock, never across
// an await point.
// ---------------------------------------------------------------------------

#[derive(Default)]
struct StoreInner {
    transactions: HashMap<String, Transaction>,
    earnings: Vec<VendorEarning>,
    payouts: Vec<VendorPayout>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
    status_write_failures: Mutex<u32>,
}

impl InMemoryStore {
    pub fn transaction(&self, reference: &str) -> Option<Transaction> {
        self.inner.lock().unwrap().transactions.get(reference).cloned()
    }

    pub fn earnings(&self) -> Vec<VendorEarning> {
        self.inner.lock().unwrap().earnings.clone()
    }

    pub fn payouts(&self) -> Vec<VendorPayout> {
        self.inner.lock().unwrap().payouts.clone()
    }

    pub fn transaction_count(&self) -> usize {
        self.inner.lock().unwrap().transactions.len()
    }

    /// Makes the next `n` status writes fail with a persistence error.
    pub fn fail_next_status_writes(&self, n: u32) {
        *self.status_write_failures.lock().unwrap() = n;
    }
}

#[async_trait]
impl SettlementStore for InMemoryStore {
    async fn create_transaction(&self, tx: &Transaction) -> Result<()> {
        self.inner
            .lock()
            .unwrap()
            .transactions
            .insert(tx.reference.clone(), tx.clone());
        Ok(())
    }

    async fn transaction_by_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        Ok(self.transaction(reference))
    }

    async fn attach_payment_link(&self, reference: &str, link: &str) -> Result<()> {
        if let Some(tx) = self.inner.lock().unwrap().transactions.get_mut(reference) {
            tx.payment_link = Some(link.to_string());
        }
        Ok(())
    }

    async fn resolve_status(
        &self,
        reference: &str,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>> {
        {
            let mut failures = self.status_write_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(AppError::persistence("injected status write failure"));
            }
        }

        let mut inner = self.inner.lock().unwrap();
        match inner.transactions.get_mut(reference) {
            Some(tx) if tx.status == TransactionStatus::Pending => {
                tx.status = status;
                Ok(Some(tx.clone()))
            }
            Some(_) => Ok(None),
            None => Ok(None),
        }
    }

    async fn record_earning(&self, earning: &VendorEarning) -> Result<()> {
        self.inner.lock().unwrap().earnings.push(earning.clone());
        Ok(())
    }

    async fn create_payout(&self, payout: &VendorPayout) -> Result<()> {
        self.inner.lock().unwrap().payouts.push(payout.clone());
        Ok(())
    }

    async fn transactions_for_vendor(&self, vendor_id: &str) -> Result<Vec<Transaction>> {
        let mut txs: Vec<Transaction> = self
            .inner
            .lock()
            .unwrap()
            .transactions
            .values()
            .filter(|t| t.vendor_id == vendor_id)
            .cloned()
            .collect();
        txs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(txs)
    }

    async fn earnings_for_vendor(&self, vendor_id: &str) -> Result<Vec<VendorEarning>> {
        let mut earnings: Vec<VendorEarning> = self
            .inner
            .lock()
            .unwrap()
            .earnings
            .iter()
            .filter(|e| e.vendor_id == vendor_id)
            .cloned()
            .collect();
        earnings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(earnings)
    }

    async fn payouts_for_vendor(&self, vendor_id: &str) -> Result<Vec<VendorPayout>> {
        let mut payouts: Vec<VendorPayout> = self
            .inner
            .lock()
            .unwrap()
            .payouts
            .iter()
            .filter(|p| p.vendor_id == vendor_id)
            .cloned()
            .collect();
        payouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payouts)
    }
}

// ---------------------------------------------------------------------------
// Scripted gateway.
// ---------------------------------------------------------------------------

pub struct GatewayScript {
    pub initiate_outcome: InitiationOutcome,
    pub verify_status: Option<String>,
    pub verify_transport_failure: bool,
    pub initiate_calls: u32,
    pub verify_calls: u32,
    pub last_request: Option<PaymentRequest>,
}

impl Default for GatewayScript {
    fn default() -> Self {
        GatewayScript {
            initiate_outcome: InitiationOutcome {
                status_code: 201,
                payment_url: Some("https://pay.test/link/abc".to_string()),
                message: None,
            },
            verify_status: None,
            verify_transport_failure: false,
            initiate_calls: 0,
            verify_calls: 0,
            last_request: None,
        }
    }
}

#[derive(Default)]
pub struct StubGateway {
    script: Mutex<GatewayScript>,
}

impl StubGateway {
    pub fn refuse_initiations(&self, status_code: i64) {
        let mut script = self.script.lock().unwrap();
        script.initiate_outcome = InitiationOutcome {
            status_code,
            payment_url: None,
            message: Some("refused".to_string()),
        };
    }

    pub fn answer_verify_with(&self, status: &str) {
        let mut script = self.script.lock().unwrap();
        script.verify_status = Some(status.to_string());
        script.verify_transport_failure = false;
    }

    pub fn fail_verifications(&self) {
        self.script.lock().unwrap().verify_transport_failure = true;
    }

    pub fn initiate_calls(&self) -> u32 {
        self.script.lock().unwrap().initiate_calls
    }

    pub fn verify_calls(&self) -> u32 {
        self.script.lock().unwrap().verify_calls
    }

    pub fn last_request(&self) -> Option<PaymentRequest> {
        self.script.lock().unwrap().last_request.clone()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn initiate(&self, request: &PaymentRequest) -> Result<InitiationOutcome> {
        let mut script = self.script.lock().unwrap();
        script.initiate_calls += 1;
        script.last_request = Some(request.clone());
        Ok(script.initiate_outcome.clone())
    }

    async fn verify(&self, _reference: &str) -> Result<VerificationOutcome> {
        let mut script = self.script.lock().unwrap();
        script.verify_calls += 1;
        if script.verify_transport_failure {
            return Err(AppError::gateway_verification("injected transport failure"));
        }
        Ok(VerificationOutcome {
            status: script
                .verify_status
                .clone()
                .unwrap_or_else(|| "PENDING".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Stub vendor directory.
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct VendorEntry {
    pub identity: Option<String>,
    pub frequency: PayoutFrequency,
}

#[derive(Default)]
pub struct StubVendors {
    entries: Mutex<HashMap<String, VendorEntry>>,
    failing: Mutex<bool>,
}

impl StubVendors {
    pub fn insert(&self, vendor_id: &str, identity: Option<&str>, frequency: PayoutFrequency) {
        self.entries.lock().unwrap().insert(
            vendor_id.to_string(),
            VendorEntry {
                identity: identity.map(String::from),
                frequency,
            },
        );
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn identity_of(&self, vendor_id: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(vendor_id)
            .and_then(|e| e.identity.clone())
    }
}

#[async_trait]
impl VendorDirectory for StubVendors {
    async fn settlement_identity(&self, vendor_id: &str) -> Result<Option<String>> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::vendor_lookup("injected lookup failure"));
        }
        Ok(self.identity_of(vendor_id))
    }

    async fn payout_frequency(&self, vendor_id: &str) -> Result<Option<PayoutFrequency>> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::vendor_lookup("injected lookup failure"));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(vendor_id)
            .map(|e| e.frequency))
    }

    async fn assign_settlement_identity(&self, vendor_id: &str, identity: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(vendor_id.to_string()).or_insert(VendorEntry {
            identity: None,
            frequency: PayoutFrequency::Monthly,
        });
        entry.identity = Some(identity.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Assembled engine.
// ---------------------------------------------------------------------------

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub gateway: Arc<StubGateway>,
    pub vendors: Arc<StubVendors>,
    pub initiator: PaymentInitiator,
    pub reconciler: StatusReconciler,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        gateway_api_key: "test-key".to_string(),
        gateway_environment: "sandbox".to_string(),
        gateway_notify_url: "https://api.test/api/payments/webhook".to_string(),
        gateway_return_url: "https://shop.test/checkout/done".to_string(),
        payment_channel: "mobile_money".to_string(),
        currency: "XAF".to_string(),
        platform_merchant_id: PLATFORM_ID.to_string(),
        database_url: "mongodb://localhost:27017".to_string(),
        database_name: "marketpay_test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
    }
}

pub fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::default());
    let gateway = Arc::new(StubGateway::default());
    let vendors = Arc::new(StubVendors::default());
    let config = test_config();

    let resolver = VendorSettlementResolver::new(vendors.clone(), PLATFORM_ID.to_string());
    let initiator = PaymentInitiator::new(gateway.clone(), store.clone(), resolver, &config);
    let reconciler = StatusReconciler::new(
        gateway.clone(),
        store.clone(),
        EarningsLedger::new(store.clone()),
        PayoutScheduler::new(store.clone(), vendors.clone()),
    );

    Harness {
        store,
        gateway,
        vendors,
        initiator,
        reconciler,
    }
}

pub fn payment(amount: i64, vendor_id: &str) -> NewPayment {
    NewPayment {
        amount,
        customer: Customer {
            id: "cust-1".to_string(),
            name: "Ama Nkeng".to_string(),
            email: "ama@example.cm".to_string(),
            phone: "+237670000001".to_string(),
            address: Some("Douala".to_string()),
        },
        description: "Order checkout".to_string(),
        vendor_id: vendor_id.to_string(),
        order_id: Some("order-77".to_string()),
        metadata: None,
    }
}

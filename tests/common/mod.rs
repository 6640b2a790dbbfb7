use async_trait::async_trait;
use payflow::application::orchestrator::PaymentOrchestrator;
use payflow::domain::payment::Payment;
use payflow::domain::ports::{GatewayRegistryHandle, PaymentStore, PaymentStoreHandle};
use payflow::domain::transaction::{Transaction, TransactionKind};
use payflow::error::Result;
use payflow::infrastructure::in_memory::InMemoryPaymentStore;
use payflow::infrastructure::mock_gateway::{MockBehavior, MockGateway};
use payflow::infrastructure::registry::StaticGatewayRegistry;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Orchestrator wired to an in-memory store and a scripted gateway fleet,
/// with the store kept around for inspection.
pub struct Harness {
    pub orchestrator: PaymentOrchestrator,
    pub store: Arc<InMemoryPaymentStore>,
}

pub fn harness(behavior: MockBehavior) -> Harness {
    harness_with(&[("mock", behavior)])
}

pub fn harness_with(gateways: &[(&str, MockBehavior)]) -> Harness {
    let mut registry = StaticGatewayRegistry::new();
    for (name, behavior) in gateways {
        registry.register(Arc::new(MockGateway::new(*name, *behavior)));
    }

    let store = Arc::new(InMemoryPaymentStore::new());
    let store_handle: PaymentStoreHandle = store.clone();
    let registry_handle: GatewayRegistryHandle = Arc::new(registry);

    Harness {
        orchestrator: PaymentOrchestrator::new(store_handle, registry_handle),
        store,
    }
}

pub fn payment(id: u64, total: Decimal) -> Payment {
    Payment::new(id, total, "USD", Some("mock".to_string()))
}

/// Store wrapper that counts `commit` calls, for asserting that guard
/// rejections never reach persistence.
pub struct CountingStore {
    inner: InMemoryPaymentStore,
    commits: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryPaymentStore::new(),
            commits: AtomicUsize::new(0),
        }
    }

    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentStore for CountingStore {
    async fn get(&self, payment_id: u64) -> Result<Option<Payment>> {
        self.inner.get(payment_id).await
    }

    async fn upsert(&self, payment: Payment) -> Result<()> {
        self.inner.upsert(payment).await
    }

    async fn commit(&self, payment: &Payment, transaction: &Transaction) -> Result<()> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.inner.commit(payment, transaction).await
    }

    async fn latest_successful(
        &self,
        payment_id: u64,
        kind: TransactionKind,
    ) -> Result<Option<Transaction>> {
        self.inner.latest_successful(payment_id, kind).await
    }

    async fn transactions(&self, payment_id: u64) -> Result<Vec<Transaction>> {
        self.inner.transactions(payment_id).await
    }

    async fn all_payments(&self) -> Result<Vec<Payment>> {
        self.inner.all_payments().await
    }
}

/// Orchestrator over a `CountingStore` and a single always-successful
/// `mock` gateway.
pub fn counting_harness() -> (PaymentOrchestrator, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::new());
    let store_handle: PaymentStoreHandle = store.clone();
    let registry_handle: GatewayRegistryHandle = Arc::new(
        StaticGatewayRegistry::new()
            .with(Arc::new(MockGateway::new("mock", MockBehavior::Success))),
    );

    (
        PaymentOrchestrator::new(store_handle, registry_handle),
        store,
    )
}

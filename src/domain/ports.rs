use super::gateway::{Gateway, GatewayBackend};
use super::payment::Payment;
use super::transaction::{Transaction, TransactionKind};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Storage port for payment records and their transaction history.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn get(&self, payment_id: u64) -> Result<Option<Payment>>;
    async fn upsert(&self, payment: Payment) -> Result<()>;
    /// Persists the mutated payment and appends the transaction as one
    /// storage transaction; a crash must not separate the two.
    async fn commit(&self, payment: &Payment, transaction: &Transaction) -> Result<()>;
    /// Most recent successful transaction of `kind` for this payment.
    async fn latest_successful(
        &self,
        payment_id: u64,
        kind: TransactionKind,
    ) -> Result<Option<Transaction>>;
    async fn transactions(&self, payment_id: u64) -> Result<Vec<Transaction>>;
    async fn all_payments(&self) -> Result<Vec<Payment>>;
}

/// Resolves a gateway identifier to a backend handle.
pub trait GatewayRegistry: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Arc<dyn GatewayBackend>>;
    fn list(&self) -> Vec<Gateway>;
}

pub type PaymentStoreHandle = Arc<dyn PaymentStore>;
pub type GatewayRegistryHandle = Arc<dyn GatewayRegistry>;

use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory store for payments and their transaction history.
///
/// Both tables sit behind a single `Arc<RwLock<_>>` so `commit` lands the
/// payment update and the appended transaction together. Ideal for tests
/// and the CLI harness where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    payments: HashMap<u64, Payment>,
    transactions: Vec<Transaction>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn get(&self, payment_id: u64) -> Result<Option<Payment>> {
        let tables = self.inner.read().await;
        Ok(tables.payments.get(&payment_id).cloned())
    }

    async fn upsert(&self, payment: Payment) -> Result<()> {
        let mut tables = self.inner.write().await;
        tables.payments.insert(payment.id, payment);
        Ok(())
    }

    async fn commit(&self, payment: &Payment, transaction: &Transaction) -> Result<()> {
        let mut tables = self.inner.write().await;
        tables.payments.insert(payment.id, payment.clone());
        tables.transactions.push(transaction.clone());
        Ok(())
    }

    async fn latest_successful(
        &self,
        payment_id: u64,
        kind: TransactionKind,
    ) -> Result<Option<Transaction>> {
        let tables = self.inner.read().await;
        Ok(tables
            .transactions
            .iter()
            .rev()
            .find(|t| t.payment_id == payment_id && t.kind == kind && t.is_success)
            .cloned())
    }

    async fn transactions(&self, payment_id: u64) -> Result<Vec<Transaction>> {
        let tables = self.inner.read().await;
        Ok(tables
            .transactions
            .iter()
            .filter(|t| t.payment_id == payment_id)
            .cloned()
            .collect())
    }

    async fn all_payments(&self) -> Result<Vec<Payment>> {
        let tables = self.inner.read().await;
        let mut payments: Vec<Payment> = tables.payments.values().cloned().collect();
        payments.sort_by_key(|p| p.id);
        Ok(payments)
    }
}

use super::classifier::{self, GENERIC_TRANSACTION_ERROR};
use super::factory;
use super::guards;
use crate::domain::gateway::{
    CustomerSource, Gateway, GatewayBackend, GatewayResponse, GatewayResult, PaymentInformation,
};
use crate::domain::payment::Payment;
use crate::domain::ports::{
    GatewayRegistry, GatewayRegistryHandle, PaymentStore, PaymentStoreHandle,
};
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

/// Entry point for all payment operations.
///
/// Every mutating operation runs the same pipeline: guards, backend
/// resolution, one classified gateway call, one recorded transaction. A
/// guard rejection aborts before dispatch with no side effects; once the
/// backend has been invoked, exactly one transaction is committed whether
/// the call succeeded or not, and an unsuccessful one is re-raised to the
/// caller after being recorded.
///
/// The orchestrator provides no cross-request mutual exclusion: callers
/// must keep concurrent submissions for the same payment from running in
/// parallel, e.g. with an idempotency layer at the request boundary.
pub struct PaymentOrchestrator {
    store: PaymentStoreHandle,
    registry: GatewayRegistryHandle,
    gateway_timeout: Duration,
}

impl PaymentOrchestrator {
    pub fn new(store: PaymentStoreHandle, registry: GatewayRegistryHandle) -> Self {
        Self {
            store,
            registry,
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }

    /// Upper bound for a single backend call; expiry is classified as a
    /// gateway failure and recorded like any other.
    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }

    /// One-step charge without a prior authorization. Records a capture.
    pub async fn process(
        &self,
        payment: &mut Payment,
        token: &str,
        store_source: bool,
    ) -> Result<Transaction> {
        guards::require_active(payment)?;
        let backend = self.resolve_backend(payment)?;
        let info = PaymentInformation::new(payment, Some(token.to_string()), None, store_source);
        let (response, error) = self.dispatch(backend.process(&info)).await;
        self.record(payment, TransactionKind::Capture, &info, response, error)
            .await
    }

    /// Places a hold on the payment's total, enabling later capture or void.
    pub async fn authorize(
        &self,
        payment: &mut Payment,
        token: &str,
        store_source: bool,
    ) -> Result<Transaction> {
        guards::require_active(payment)?;
        guards::clean_authorize(payment)?;
        let backend = self.resolve_backend(payment)?;
        let info = PaymentInformation::new(payment, Some(token.to_string()), None, store_source);
        let (response, error) = self.dispatch(backend.authorize(&info)).await;
        self.record(payment, TransactionKind::Auth, &info, response, error)
            .await
    }

    /// Settles a previously authorized amount. `amount` defaults to the
    /// full un-captured charge amount.
    pub async fn capture(
        &self,
        payment: &mut Payment,
        amount: Option<Decimal>,
        store_source: bool,
    ) -> Result<Transaction> {
        guards::require_active(payment)?;
        let amount = amount.unwrap_or_else(|| payment.charge_amount());
        guards::clean_capture(payment, amount)?;
        let backend = self.resolve_backend(payment)?;
        let token = self
            .past_transaction_token(payment, TransactionKind::Auth)
            .await?;
        let info = PaymentInformation::new(payment, Some(token), Some(amount), store_source);
        let (response, error) = self.dispatch(backend.capture(&info)).await;
        if let Some(card) = response.as_ref().and_then(|r| r.card_info.as_ref()) {
            payment.update_card_details(card);
        }
        self.record(payment, TransactionKind::Capture, &info, response, error)
            .await
    }

    /// Returns captured funds. `amount` defaults to everything captured.
    pub async fn refund(
        &self,
        payment: &mut Payment,
        amount: Option<Decimal>,
    ) -> Result<Transaction> {
        guards::require_active(payment)?;
        let amount = amount.unwrap_or(payment.captured_amount);
        guards::clean_refund(payment, amount)?;
        let backend = self.resolve_backend(payment)?;
        let token = self
            .past_transaction_token(payment, TransactionKind::Capture)
            .await?;
        let info = PaymentInformation::new(payment, Some(token), Some(amount), false);
        let (response, error) = self.dispatch(backend.refund(&info)).await;
        self.record(payment, TransactionKind::Refund, &info, response, error)
            .await
    }

    /// Releases an authorization hold without charging.
    pub async fn void(&self, payment: &mut Payment) -> Result<Transaction> {
        guards::require_active(payment)?;
        let backend = self.resolve_backend(payment)?;
        let token = self
            .past_transaction_token(payment, TransactionKind::Auth)
            .await?;
        let info = PaymentInformation::new(payment, Some(token), None, false);
        let (response, error) = self.dispatch(backend.void(&info)).await;
        self.record(payment, TransactionKind::Void, &info, response, error)
            .await
    }

    /// Confirms a pending authorization with the provider.
    pub async fn confirm(&self, payment: &mut Payment) -> Result<Transaction> {
        guards::require_active(payment)?;
        let backend = self.resolve_backend(payment)?;
        let token = self
            .past_transaction_token(payment, TransactionKind::Auth)
            .await?;
        let info = PaymentInformation::new(payment, Some(token), None, false);
        let (response, error) = self.dispatch(backend.confirm(&info)).await;
        self.record(payment, TransactionKind::Confirm, &info, response, error)
            .await
    }

    pub fn list_gateways(&self) -> Vec<Gateway> {
        self.registry.list()
    }

    pub async fn list_payment_sources(
        &self,
        gateway: &str,
        customer_id: &str,
    ) -> Result<Vec<CustomerSource>> {
        let backend = self
            .registry
            .resolve(gateway)
            .ok_or_else(|| PaymentError::GatewayNotConfigured(gateway.to_string()))?;
        backend.list_payment_sources(customer_id).await.map_err(|err| {
            tracing::error!(error = %err, gateway, "listing payment sources failed");
            PaymentError::TransactionFailed(classifier::ERROR_MSG.to_string())
        })
    }

    pub async fn get_client_token(&self, payment: &Payment) -> Result<String> {
        let backend = self.resolve_backend(payment)?;
        let info = PaymentInformation::new(payment, None, None, false);
        backend.get_client_token(&info).await.map_err(|err| {
            tracing::error!(error = %err, payment_id = payment.id, "fetching client token failed");
            PaymentError::TransactionFailed(classifier::ERROR_MSG.to_string())
        })
    }

    fn resolve_backend(&self, payment: &Payment) -> Result<Arc<dyn GatewayBackend>> {
        let name = payment
            .gateway
            .as_deref()
            .ok_or(PaymentError::MissingGateway)?;
        self.registry
            .resolve(name)
            .ok_or_else(|| PaymentError::GatewayNotConfigured(name.to_string()))
    }

    /// Token of the most recent successful transaction of `kind`; the
    /// chained operations must not be dispatched without one.
    async fn past_transaction_token(
        &self,
        payment: &Payment,
        kind: TransactionKind,
    ) -> Result<String> {
        match self.store.latest_successful(payment.id, kind).await? {
            Some(txn) => Ok(txn.token),
            None => Err(PaymentError::MissingPriorTransaction(kind)),
        }
    }

    async fn dispatch<F>(&self, call: F) -> (Option<GatewayResponse>, Option<String>)
    where
        F: Future<Output = GatewayResult<GatewayResponse>>,
    {
        classifier::fetch_gateway_response(call, self.gateway_timeout).await
    }

    /// Shared tail of every mutating operation: build the record, apply its
    /// effects, commit both atomically, then surface a failure.
    async fn record(
        &self,
        payment: &mut Payment,
        kind: TransactionKind,
        info: &PaymentInformation,
        response: Option<GatewayResponse>,
        error: Option<String>,
    ) -> Result<Transaction> {
        let transaction = factory::build_transaction(payment, kind, info, response, error);
        factory::apply_postprocess(payment, &transaction);
        self.store.commit(payment, &transaction).await?;

        if !transaction.is_success {
            let message = transaction
                .error
                .clone()
                .unwrap_or_else(|| GENERIC_TRANSACTION_ERROR.to_string());
            return Err(PaymentError::TransactionFailed(message));
        }
        Ok(transaction)
    }
}

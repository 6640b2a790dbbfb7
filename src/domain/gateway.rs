use super::payment::Payment;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised by a backend call or by response validation.
///
/// Never reaches callers as-is: the classifier logs it and substitutes a
/// generic message before anything is recorded or surfaced.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),
    #[error("{0}")]
    Backend(String),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Descriptor for a registered gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub name: String,
}

/// Card metadata a backend may echo back with a capture response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub brand: String,
    pub last_digits: String,
    pub exp_month: u32,
    pub exp_year: u32,
}

/// A payment source vaulted on the provider side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSource {
    pub id: String,
    pub gateway: String,
    pub card: Option<CardInfo>,
}

/// Request-scoped snapshot of a payment handed to a backend for one call.
/// Built fresh per operation and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentInformation {
    pub payment_id: u64,
    /// Client token for process/authorize, prior-transaction token for the
    /// chained operations.
    pub token: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub customer_id: Option<String>,
    pub store_source: bool,
}

impl PaymentInformation {
    /// Snapshots `payment` for one call. `amount` defaults to the payment's
    /// full total when the operation did not narrow it.
    pub fn new(
        payment: &Payment,
        token: Option<String>,
        amount: Option<Decimal>,
        store_source: bool,
    ) -> Self {
        Self {
            payment_id: payment.id,
            token,
            amount: amount.unwrap_or(payment.total),
            currency: payment.currency.clone(),
            customer_id: payment.customer_id.clone(),
            store_source,
        }
    }
}

/// Normalized outcome a backend returns for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub is_success: bool,
    /// Gateway-side identifier for this interaction; required.
    pub transaction_id: String,
    pub amount: Decimal,
    pub currency: String,
    /// Provider-facing decline reason, safe to show to the customer.
    pub error: Option<String>,
    pub card_info: Option<CardInfo>,
    #[serde(default)]
    pub raw_response: serde_json::Value,
}

/// One pluggable payment provider integration.
///
/// Implementations may fail however they like; the orchestration layer
/// classifies every failure uniformly and never lets detail leak past the
/// logs.
#[async_trait]
pub trait GatewayBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn authorize(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse>;
    async fn capture(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse>;
    async fn refund(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse>;
    async fn void(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse>;
    async fn confirm(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse>;
    async fn process(&self, info: &PaymentInformation) -> GatewayResult<GatewayResponse>;

    async fn list_payment_sources(&self, customer_id: &str) -> GatewayResult<Vec<CustomerSource>>;
    async fn get_client_token(&self, info: &PaymentInformation) -> GatewayResult<String>;
}

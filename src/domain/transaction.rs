use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of one gateway interaction. `process` reuses
/// `Capture` rather than adding a kind of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Auth,
    Capture,
    Refund,
    Void,
    Confirm,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionKind::Auth => "auth",
            TransactionKind::Capture => "capture",
            TransactionKind::Refund => "refund",
            TransactionKind::Void => "void",
            TransactionKind::Confirm => "confirm",
        };
        f.write_str(name)
    }
}

/// Audit record of one gateway interaction.
///
/// Append-only per payment and never mutated after creation. Failed calls
/// are recorded too, so the history shows every attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub payment_id: u64,
    pub kind: TransactionKind,
    /// Gateway-issued identifier used to chain follow-up calls.
    pub token: String,
    pub amount: Decimal,
    pub currency: String,
    pub is_success: bool,
    pub error: Option<String>,
    /// Raw payload as returned by the backend.
    pub gateway_response: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

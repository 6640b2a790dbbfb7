use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Creates an active payment record; `amount` is the total, `gateway`
    /// names the backend. Owner-side action, not an orchestration call.
    Open,
    /// Flips the payment inactive. Owner-side action.
    Deactivate,
    Process,
    Authorize,
    Capture,
    Refund,
    Void,
    Confirm,
}

/// One row of the replay file: `op, payment, amount, token, gateway`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub op: OperationKind,
    pub payment: u64,
    pub amount: Option<Decimal>,
    pub token: Option<String>,
    pub gateway: Option<String>,
}

/// Reads payment operations from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record
/// lengths, and yields operations lazily.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

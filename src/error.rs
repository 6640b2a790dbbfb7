use crate::domain::transaction::TransactionKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// All orchestration failures share this one type; the variant is the
/// discriminant separating precondition rejections, configuration faults,
/// and recorded gateway failures.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("This payment is no longer active.")]
    InactivePayment,
    #[error("Amount should be a positive number.")]
    NonPositiveAmount,
    #[error("Cannot refund more than captured")]
    RefundExceedsCaptured,
    #[error("Unable to charge more than un-captured amount.")]
    CaptureExceedsUncaptured,
    #[error("Charged transactions cannot be authorized again.")]
    CannotAuthorize,
    #[error("This payment cannot be captured.")]
    CannotCapture,
    #[error("This payment cannot be refunded.")]
    CannotRefund,
    #[error("Cannot find successful {0} transaction")]
    MissingPriorTransaction(TransactionKind),
    /// Deployment fault, not a transactional failure: the payment carries
    /// no gateway identifier at all.
    #[error("Payment has no gateway assigned.")]
    MissingGateway,
    /// Deployment fault: the identifier resolves to no registered backend.
    #[error("Payment gateway {0} is not configured.")]
    GatewayNotConfigured(String),
    /// A dispatched gateway call that failed. By the time this surfaces the
    /// attempt has already been recorded as a failed transaction.
    #[error("{0}")]
    TransactionFailed(String),
    #[error("Unknown payment {0}")]
    UnknownPayment(u64),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Storage error: {0}")]
    Storage(String),
}

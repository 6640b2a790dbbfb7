use crate::domain::gateway::{GatewayResponse, PaymentInformation};
use crate::domain::payment::{ChargeStatus, Payment};
use crate::domain::transaction::{Transaction, TransactionKind};
use chrono::Utc;
use rust_decimal::Decimal;

/// Builds the audit record for one completed gateway call.
///
/// When classification produced no response, a synthetic failure is built
/// from the request snapshot instead, so the attempt is recorded either way.
pub fn build_transaction(
    payment: &Payment,
    kind: TransactionKind,
    info: &PaymentInformation,
    response: Option<GatewayResponse>,
    error: Option<String>,
) -> Transaction {
    match response {
        Some(response) => Transaction {
            payment_id: payment.id,
            kind,
            token: response.transaction_id,
            amount: response.amount,
            currency: response.currency,
            is_success: error.is_none() && response.is_success,
            error: error.or(response.error),
            gateway_response: response.raw_response,
            created_at: Utc::now(),
        },
        None => Transaction {
            payment_id: payment.id,
            kind,
            token: info.token.clone().unwrap_or_default(),
            amount: info.amount,
            currency: info.currency.clone(),
            is_success: false,
            error,
            gateway_response: serde_json::Value::Object(Default::default()),
            created_at: Utc::now(),
        },
    }
}

/// Applies a recorded transaction's effects back onto the payment.
///
/// Runs for every produced transaction; unsuccessful ones leave the
/// payment untouched.
pub fn apply_postprocess(payment: &mut Payment, transaction: &Transaction) {
    if !transaction.is_success {
        return;
    }

    match transaction.kind {
        TransactionKind::Capture => {
            payment.captured_amount += transaction.amount;
            payment.charge_status = if payment.charge_amount() <= Decimal::ZERO {
                ChargeStatus::FullyCharged
            } else {
                ChargeStatus::PartiallyCharged
            };
        }
        TransactionKind::Refund => {
            payment.captured_amount -= transaction.amount;
            if payment.captured_amount <= Decimal::ZERO {
                payment.charge_status = ChargeStatus::FullyRefunded;
                payment.is_active = false;
            } else {
                payment.charge_status = ChargeStatus::PartiallyRefunded;
            }
        }
        TransactionKind::Void => {
            payment.is_active = false;
        }
        TransactionKind::Auth | TransactionKind::Confirm => {}
    }
}

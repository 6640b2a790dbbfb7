use crate::domain::payment::Payment;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;

/// Rejects any mutating operation on a payment that is no longer active.
/// Read-only operations never run this check.
pub fn require_active(payment: &Payment) -> Result<()> {
    if !payment.is_active {
        return Err(PaymentError::InactivePayment);
    }
    Ok(())
}

/// An already-charged payment cannot enter a second authorization.
pub fn clean_authorize(payment: &Payment) -> Result<()> {
    if !payment.can_authorize() {
        return Err(PaymentError::CannotAuthorize);
    }
    Ok(())
}

pub fn clean_capture(payment: &Payment, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::NonPositiveAmount);
    }
    if !payment.can_capture() {
        return Err(PaymentError::CannotCapture);
    }
    if amount > payment.charge_amount() {
        return Err(PaymentError::CaptureExceedsUncaptured);
    }
    Ok(())
}

pub fn clean_refund(payment: &Payment, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::NonPositiveAmount);
    }
    if amount > payment.captured_amount {
        return Err(PaymentError::RefundExceedsCaptured);
    }
    if !payment.can_refund() {
        return Err(PaymentError::CannotRefund);
    }
    Ok(())
}

use super::gateway::CardInfo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a payment sits in its charge lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChargeStatus {
    #[default]
    NotCharged,
    PartiallyCharged,
    FullyCharged,
    PartiallyRefunded,
    FullyRefunded,
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChargeStatus::NotCharged => "not-charged",
            ChargeStatus::PartiallyCharged => "partially-charged",
            ChargeStatus::FullyCharged => "fully-charged",
            ChargeStatus::PartiallyRefunded => "partially-refunded",
            ChargeStatus::FullyRefunded => "fully-refunded",
        };
        f.write_str(name)
    }
}

/// A customer's payment record.
///
/// Created and owned by the calling checkout context; the orchestration
/// layer only reads it, updates `captured_amount`, card metadata and the
/// charge status, and appends transactions through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    /// Identifier of the configured gateway backend, if any.
    pub gateway: Option<String>,
    /// Inactive payments reject every mutating operation.
    pub is_active: bool,
    pub total: Decimal,
    pub captured_amount: Decimal,
    pub currency: String,
    pub charge_status: ChargeStatus,
    pub customer_id: Option<String>,
    pub card_brand: Option<String>,
    pub card_last_digits: Option<String>,
    pub card_exp_month: Option<u32>,
    pub card_exp_year: Option<u32>,
}

impl Payment {
    pub fn new(id: u64, total: Decimal, currency: impl Into<String>, gateway: Option<String>) -> Self {
        Self {
            id,
            gateway,
            is_active: true,
            total,
            captured_amount: Decimal::ZERO,
            currency: currency.into(),
            charge_status: ChargeStatus::NotCharged,
            customer_id: None,
            card_brand: None,
            card_last_digits: None,
            card_exp_month: None,
            card_exp_year: None,
        }
    }

    /// Amount still open for capture.
    pub fn charge_amount(&self) -> Decimal {
        self.total - self.captured_amount
    }

    pub fn can_authorize(&self) -> bool {
        self.is_active && self.charge_status == ChargeStatus::NotCharged
    }

    pub fn can_capture(&self) -> bool {
        self.is_active && self.charge_status == ChargeStatus::NotCharged
    }

    pub fn can_void(&self) -> bool {
        self.is_active && self.charge_status == ChargeStatus::NotCharged
    }

    pub fn can_refund(&self) -> bool {
        matches!(
            self.charge_status,
            ChargeStatus::PartiallyCharged
                | ChargeStatus::FullyCharged
                | ChargeStatus::PartiallyRefunded
        )
    }

    /// Copies card metadata from a capture response onto the record.
    pub fn update_card_details(&mut self, card: &CardInfo) {
        self.card_brand = Some(card.brand.clone());
        self.card_last_digits = Some(card.last_digits.clone());
        self.card_exp_month = Some(card.exp_month);
        self.card_exp_year = Some(card.exp_year);
    }
}

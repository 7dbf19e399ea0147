//! Payment domain entities.
//! Framework-agnostic representation of a card payment and its outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inbound card-payment request. Transient: never stored as-is.
///
/// Missing JSON fields deserialize to empty/zero values so that the validator,
/// not the decoder, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentRequest {
    pub card_number: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub cvv: String,
}

/// Status of a processed payment.
///
/// `Rejected` is only ever reported to callers; a rejected request never
/// reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorized,
    Declined,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Authorized => "Authorized",
            PaymentStatus::Declined => "Declined",
            PaymentStatus::Rejected => "Rejected",
        }
    }

    /// Maps the bank's authorization flag onto a stored status.
    pub fn from_authorized(authorized: bool) -> Self {
        if authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one successful exchange with the acquiring bank.
/// A declined payment is `authorized == false`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankOutcome {
    pub authorized: bool,
    #[serde(default)]
    pub authorization_code: String,
}

/// Stored payment. Holds only the last four card digits; the full PAN and
/// the CVV are dropped before this is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: String,
    pub status: PaymentStatus,
    pub card_number_last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
    pub authorization_code: String,
}

impl PaymentRecord {
    pub fn new(id: String, request: &PaymentRequest, outcome: BankOutcome) -> Self {
        Self {
            id,
            status: PaymentStatus::from_authorized(outcome.authorized),
            card_number_last_four: last_four(&request.card_number),
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            currency: request.currency.clone(),
            amount: request.amount,
            authorization_code: outcome.authorization_code,
        }
    }
}

/// Outbound view of a stored payment. The authorization code is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub status: PaymentStatus,
    pub card_number_last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
}

impl From<&PaymentRecord> for PaymentResponse {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id.clone(),
            status: record.status,
            card_number_last_four: record.card_number_last_four.clone(),
            expiry_month: record.expiry_month,
            expiry_year: record.expiry_year,
            currency: record.currency.clone(),
            amount: record.amount,
        }
    }
}

/// Last four characters of a card number, or the whole value when shorter.
pub fn last_four(card_number: &str) -> String {
    let len = card_number.chars().count();
    card_number.chars().skip(len.saturating_sub(4)).collect()
}

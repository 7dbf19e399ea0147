pub mod client;

pub use client::{BankError, BankPaymentRequest, HttpBankClient};

use crate::domain::{BankOutcome, PaymentRequest};
use async_trait::async_trait;

/// A single authorize exchange with the acquiring bank.
///
/// `Ok` covers both approved and declined payments; `Err` means the exchange
/// itself failed and nothing may be stored.
#[async_trait]
pub trait AcquiringBank: Send + Sync {
    async fn authorize(&self, request: &PaymentRequest) -> Result<BankOutcome, BankError>;
}

//! Payment orchestration: validate, authorize with the bank, store, respond.

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::bank::{AcquiringBank, BankError};
use crate::domain::{PaymentRecord, PaymentRequest, PaymentResponse};
use crate::ports::{PaymentRepository, RepositoryError};
use crate::validation::{PaymentValidator, ValidationError};

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("payment rejected with {} validation error(s)", .0.len())]
    Rejected(Vec<ValidationError>),
    #[error("bank processing error: {0}")]
    Bank(#[from] BankError),
    #[error("failed to store payment: {0}")]
    Storage(#[from] RepositoryError),
}

#[derive(Clone)]
pub struct PaymentService {
    validator: PaymentValidator,
    bank: Arc<dyn AcquiringBank>,
    repository: Arc<dyn PaymentRepository>,
}

impl PaymentService {
    pub fn new(
        validator: PaymentValidator,
        bank: Arc<dyn AcquiringBank>,
        repository: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            validator,
            bank,
            repository,
        }
    }

    /// Runs one payment through validation, the bank exchange and storage.
    ///
    /// The bank is only called once validation passes, and a record is only
    /// written after the exchange returns. Dropping the returned future while
    /// the exchange is in flight leaves the store untouched.
    pub async fn create_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentResponse, PaymentError> {
        let errors = self.validator.validate(&request);
        if !errors.is_empty() {
            tracing::warn!(error_count = errors.len(), "Payment rejected by validation");
            return Err(PaymentError::Rejected(errors));
        }

        let outcome = self.bank.authorize(&request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                unavailable = e.is_unavailable(),
                "Bank exchange failed"
            );
            PaymentError::Bank(e)
        })?;

        let record = PaymentRecord::new(Uuid::new_v4().to_string(), &request, outcome);
        let response = PaymentResponse::from(&record);
        self.repository.put(record).await?;

        tracing::info!(
            payment_id = %response.id,
            status = %response.status,
            card_last_four = %response.card_number_last_four,
            "Payment stored"
        );
        Ok(response)
    }

    /// Looks a payment up by id. `Ok(None)` when no such payment exists.
    pub async fn get_payment(&self, id: &str) -> Result<Option<PaymentResponse>, PaymentError> {
        let record = self.repository.get(id).await?;
        Ok(record.as_ref().map(PaymentResponse::from))
    }
}

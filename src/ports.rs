//! Storage port for payment records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PaymentRecord;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Keyed store of payment records.
///
/// `get` reports a miss as `Ok(None)`; `Err` is reserved for a broken backend.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn put(&self, record: PaymentRecord) -> RepositoryResult<()>;
    async fn get(&self, id: &str) -> RepositoryResult<Option<PaymentRecord>>;
}

//! In-memory implementation of PaymentRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::PaymentRecord;
use crate::ports::{PaymentRepository, RepositoryResult};

/// Process-lifetime payment table behind one reader/writer lock.
///
/// Readers share the lock, a writer holds it alone, and it is only held for
/// the map access itself. A single lock is enough at this scale.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<String, PaymentRecord>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn put(&self, record: PaymentRecord) -> RepositoryResult<()> {
        let mut payments = self.payments.write().await;
        payments.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> RepositoryResult<Option<PaymentRecord>> {
        let payments = self.payments.read().await;
        Ok(payments.get(id).cloned())
    }
}

use crate::domain::ports::{AuthService, TransactionLog, TransactionRecord, UserIdentity};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory transaction ledger keyed by gateway reference.
///
/// `Clone` shares the underlying map, so a test can keep a handle while the
/// dispatcher owns another.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLog {
    records: Arc<RwLock<HashMap<String, TransactionRecord>>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn record(&self, record: TransactionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.reference.clone(), record);
        Ok(())
    }

    async fn get(&self, reference: &str) -> Result<Option<TransactionRecord>> {
        let records = self.records.read().await;
        Ok(records.get(reference).cloned())
    }

    async fn all(&self) -> Result<Vec<TransactionRecord>> {
        let records = self.records.read().await;
        let mut all: Vec<TransactionRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }
}

/// An auth service with a fixed answer, for the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<UserIdentity>,
}

impl StaticAuth {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user: Some(UserIdentity { id: user_id.into() }),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthService for StaticAuth {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

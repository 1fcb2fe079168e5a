use crate::domain::ports::{TransactionLog, TransactionRecord};
use crate::error::{AwamuError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding ledger rows, keyed by gateway reference.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent transaction ledger backed by RocksDB.
///
/// Rows are stored as JSON. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBTransactionLog {
    db: Arc<DB>,
}

impl RocksDBTransactionLog {
    /// Opens or creates the ledger at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn handle(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_TRANSACTIONS).ok_or_else(|| {
            AwamuError::Io(std::io::Error::other(
                "Transactions column family not found",
            ))
        })
    }
}

#[async_trait]
impl TransactionLog for RocksDBTransactionLog {
    async fn record(&self, record: TransactionRecord) -> Result<()> {
        let cf = self.handle()?;
        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(cf, record.reference.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, reference: &str) -> Result<Option<TransactionRecord>> {
        let cf = self.handle()?;
        match self.db.get_cf(cf, reference.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn all(&self) -> Result<Vec<TransactionRecord>> {
        let cf = self.handle()?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice::<TransactionRecord>(&value)?);
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

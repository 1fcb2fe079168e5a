//! Adapters for the domain ports: in-memory ledger and auth, the offline
//! sandbox gateway and, behind `storage-rocksdb`, a persistent ledger.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod sandbox;

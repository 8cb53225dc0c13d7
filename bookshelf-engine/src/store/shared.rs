//! Thread-safe handle over a record store
//!
//! One `RwLock` covers the whole store, so the three-index fan-out of an
//! insert or cascade delete is never observed half done. Reads hand back
//! owned records because a borrow cannot outlive the guard.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::ShelfResult;
use crate::storage::Record;

use super::facade::{RecordStore, StoreStats};

/// Cloneable, lock-guarded `RecordStore`
#[derive(Debug, Clone, Default)]
pub struct SharedRecordStore {
    inner: Arc<RwLock<RecordStore>>,
}

impl SharedRecordStore {
    pub fn new(store: RecordStore) -> Self {
        SharedRecordStore {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_config(config: &StoreConfig) -> ShelfResult<Self> {
        Ok(Self::new(RecordStore::with_config(config)?))
    }

    pub fn add_record(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) {
        self.inner.write().add_record(title, author, isbn);
    }

    pub fn insert(&self, record: Record) {
        self.inner.write().insert(record);
    }

    pub fn delete_record(&self, isbn: &str) -> bool {
        self.inner.write().delete_record(isbn)
    }

    pub fn find_by_title(&self, title: &str) -> Option<Record> {
        self.inner.read().find_by_title(title).cloned()
    }

    pub fn find_by_id(&self, isbn: &str) -> Option<Record> {
        self.inner.read().find_by_id(isbn).cloned()
    }

    /// Snapshot of all records in insertion order
    pub fn list_all(&self) -> Vec<Record> {
        self.inner.read().list_all().cloned().collect()
    }

    /// Snapshot of all records in title order
    pub fn list_by_title(&self) -> Vec<Record> {
        self.inner.read().list_by_title().cloned().collect()
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.read().stats()
    }

    /// Run a closure against the store under one read lock
    pub fn with_store<R>(&self, f: impl FnOnce(&RecordStore) -> R) -> R {
        f(&self.inner.read())
    }
}

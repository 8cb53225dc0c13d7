//! Identifier index: chained hash table keyed by ISBN
//!
//! Each bucket is a `Vec<Record>` scanned front to back, so "first match"
//! always means "earliest inserted" among records sharing an ISBN.
//!
//! The bucket array is fixed unless a maximum load factor is configured.
//! With one, an insert that pushes the load factor past it doubles the
//! bucket count and rehashes; rehashing walks the old buckets in order, so
//! duplicates keep their relative order.

use tracing::{info, trace};

use super::record::Record;
use crate::config::IdentifierIndexConfig;

/// Default number of buckets
pub const DEFAULT_BUCKET_COUNT: usize = 100;

/// Upper bound on the bucket array, for configuration and for growth
pub const MAX_BUCKET_COUNT: usize = 1 << 24;

/// Smallest accepted maximum load factor
pub const MIN_LOAD_FACTOR: f64 = 0.5;

/// Polynomial rolling hash: `h = (h * 31 + byte) mod bucket_count`
pub fn hash_isbn(isbn: &str, bucket_count: usize) -> usize {
    let modulus = bucket_count.max(1) as u64;
    isbn.bytes()
        .fold(0u64, |h, b| (h * 31 + b as u64) % modulus) as usize
}

/// Hash table of records bucketed by ISBN
#[derive(Debug, Clone)]
pub struct IsbnTable {
    buckets: Vec<Vec<Record>>,
    len: usize,
    max_load_factor: Option<f64>,
}

impl IsbnTable {
    /// Create a fixed-size table
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.clamp(1, MAX_BUCKET_COUNT);
        IsbnTable {
            buckets: vec![Vec::new(); bucket_count],
            len: 0,
            max_load_factor: None,
        }
    }

    /// Create a table from a validated configuration
    pub fn with_config(config: &IdentifierIndexConfig) -> Self {
        let mut table = Self::new(config.bucket_count);
        table.max_load_factor = config.max_load_factor.map(|max| max.max(MIN_LOAD_FACTOR));
        table
    }

    fn bucket_of(&self, isbn: &str) -> usize {
        let index = hash_isbn(isbn, self.buckets.len());
        trace!("ISBN {:?} -> bucket {}", isbn, index);
        index
    }

    /// Append a record to its bucket. Duplicate ISBNs are kept.
    pub fn insert(&mut self, record: Record) {
        let index = self.bucket_of(&record.isbn);
        self.buckets[index].push(record);
        self.len += 1;

        if let Some(max) = self.max_load_factor {
            if self.load_factor() > max && self.buckets.len() < MAX_BUCKET_COUNT {
                self.grow(max);
            }
        }
    }

    /// Remove the first record with this ISBN, returning it
    pub fn remove(&mut self, isbn: &str) -> Option<Record> {
        let index = self.bucket_of(isbn);
        let bucket = &mut self.buckets[index];
        let pos = bucket.iter().position(|r| r.isbn == isbn)?;
        self.len -= 1;
        Some(bucket.remove(pos))
    }

    /// Remove the first record with this ISBN; true if one was removed
    pub fn delete(&mut self, isbn: &str) -> bool {
        self.remove(isbn).is_some()
    }

    /// Find the first record with this ISBN.
    ///
    /// The reference borrows the table, so it cannot be held across a later
    /// insert or delete.
    pub fn search(&self, isbn: &str) -> Option<&Record> {
        self.buckets[self.bucket_of(isbn)]
            .iter()
            .find(|r| r.isbn == isbn)
    }

    /// Double the bucket array, or more if that still leaves the load
    /// factor above the maximum
    fn grow(&mut self, max_load_factor: f64) {
        let needed = (self.len as f64 / max_load_factor).ceil() as usize;
        let new_count = (self.buckets.len() * 2)
            .max(needed)
            .min(MAX_BUCKET_COUNT);
        let old = std::mem::replace(&mut self.buckets, vec![Vec::new(); new_count]);

        for record in old.into_iter().flatten() {
            let index = hash_isbn(&record.isbn, new_count);
            self.buckets[index].push(record);
        }

        info!(
            "ISBN index resized to {} buckets ({} records)",
            new_count, self.len
        );
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Records per bucket
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the longest bucket chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl Default for IsbnTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

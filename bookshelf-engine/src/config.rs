//! Store configuration
//!
//! Deserializable from the driver's TOML file. Every field has a default, so
//! an empty document yields the reference layout: 100 fixed buckets and
//! identifier-only deletes.

use serde::Deserialize;

use crate::error::{ShelfError, ShelfResult};
use crate::storage::isbn_table::{DEFAULT_BUCKET_COUNT, MAX_BUCKET_COUNT, MIN_LOAD_FACTOR};

/// What a delete by ISBN removes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletePolicy {
    /// Remove from the ISBN index only. The order and title indexes keep
    /// reporting the record.
    #[default]
    IdentifierOnly,
    /// Remove the same record from all three indexes
    Cascade,
}

/// ISBN hash table settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentifierIndexConfig {
    /// Initial number of buckets
    pub bucket_count: usize,
    /// Double the bucket array when records per bucket exceed this.
    /// `None` keeps the bucket count fixed.
    pub max_load_factor: Option<f64>,
}

impl Default for IdentifierIndexConfig {
    fn default() -> Self {
        IdentifierIndexConfig {
            bucket_count: DEFAULT_BUCKET_COUNT,
            max_load_factor: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsistencyConfig {
    pub delete_policy: DeletePolicy,
}

/// Top-level store configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub identifier_index: IdentifierIndexConfig,
    pub consistency: ConsistencyConfig,
}

impl StoreConfig {
    /// Check value ranges
    pub fn validate(&self) -> ShelfResult<()> {
        let index = &self.identifier_index;

        if index.bucket_count == 0 || index.bucket_count > MAX_BUCKET_COUNT {
            return Err(ShelfError::InvalidConfig(format!(
                "bucket_count must be between 1 and {}, got {}",
                MAX_BUCKET_COUNT, index.bucket_count
            )));
        }

        if let Some(max) = index.max_load_factor {
            if !max.is_finite() || max < MIN_LOAD_FACTOR {
                return Err(ShelfError::InvalidConfig(format!(
                    "max_load_factor must be a finite number of at least {}, got {}",
                    MIN_LOAD_FACTOR, max
                )));
            }
        }

        Ok(())
    }
}

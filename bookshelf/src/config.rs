//! Configuration loading for the bookshelf binary
//!
//! The TOML file is optional; command-line flags override whatever it sets.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use bookshelf_engine::{DeletePolicy, StoreConfig};

/// Read and parse a config file, or fall back to defaults
pub fn load(path: Option<&Path>) -> Result<StoreConfig> {
    let Some(path) = path else {
        return Ok(StoreConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: StoreConfig = toml::from_str(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;

    debug!("Loaded configuration from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Apply command-line overrides on top of the file settings
pub fn apply_overrides(config: &mut StoreConfig, buckets: Option<usize>, cascade_deletes: bool) {
    if let Some(buckets) = buckets {
        config.identifier_index.bucket_count = buckets;
    }
    if cascade_deletes {
        config.consistency.delete_policy = DeletePolicy::Cascade;
    }
}

//! Storage backends for limiter window records.

mod memory;
mod redis;

pub use memory::MemoryStore;
pub use self::redis::RedisStore;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::RategateConfig;
use crate::error::Result;

/// Capability set a limiter storage backend must provide.
///
/// `exists` must reflect the most recently committed write visible to this
/// process. The setters overwrite unconditionally, last writer wins; there is
/// no conditional-set primitive, so an `exists` check followed by a set is
/// not atomic and two concurrent first calls within an unopened window can
/// both be admitted.
#[async_trait]
pub trait LimiterStore: Send + Sync {
    /// Check whether a window record exists at `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Write a window record that the backend expires after `ttl`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Write a window record that never expires.
    async fn set_forever(&self, key: &str, value: &str) -> Result<()>;
}

/// Backend selector for window record storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Networked key-value store with native TTL support
    #[default]
    Redis,
    /// In-process store, suitable for tests and single-instance deployments
    Memory,
}

/// Construct the backend selected by the configuration.
pub async fn connect(config: &RategateConfig) -> Result<Arc<dyn LimiterStore>> {
    match config.storage.storage_type {
        StorageType::Redis => Ok(Arc::new(
            RedisStore::connect(&config.storage.redis_url).await?,
        )),
        StorageType::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

//! In-process storage backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;

use super::LimiterStore;

#[derive(Debug, Clone)]
struct StoredRecord {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredRecord {
    fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-memory limiter store with lazy TTL expiry.
///
/// Records past their deadline are dropped on the next lookup. The map is
/// shared-state safe and can be used across tasks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, StoredRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Get the stored value for a key, if present and unexpired.
    pub fn value(&self, key: &str) -> Option<String> {
        self.records
            .get(key)
            .filter(|record| !record.expired())
            .map(|record| record.value.clone())
    }

    /// Get the number of live records.
    pub fn len(&self) -> usize {
        self.records
            .iter()
            .filter(|record| !record.expired())
            .count()
    }

    /// Check whether the store holds no live records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all records.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        self.records.clear();
    }
}

#[async_trait]
impl LimiterStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let expired = match self.records.get(key) {
            Some(record) => record.expired(),
            None => return Ok(false),
        };
        if expired {
            self.records.remove(key);
            return Ok(false);
        }
        Ok(true)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.records.insert(
            key.to_string(),
            StoredRecord {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn set_forever(&self, key: &str, value: &str) -> Result<()> {
        self.records.insert(
            key.to_string(),
            StoredRecord {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }
}

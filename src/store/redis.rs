//! Redis-backed storage.
//!
//! The canonical backend: window records are plain string values with a
//! native TTL, so expiry needs no sweeper on our side and the state is
//! shared by every limiter instance pointed at the same server.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::Result;

use super::LimiterStore;

/// Redis-backed limiter store.
///
/// Uses a multiplexed connection manager; cloning the handle per call is
/// cheap and keeps the trait methods `&self`.
pub struct RedisStore {
    connection: ConnectionManager,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connect to Redis at `url` (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self { connection })
    }

    /// Wrap an existing connection manager.
    pub fn from_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl LimiterStore for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection.clone();
        Ok(conn.exists(key).await?)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection.clone();
        // EX takes whole seconds; a sub-second window still needs to expire
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }

    async fn set_forever(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }
}

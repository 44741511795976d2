//! Shared count cache
//!
//! Counts are shared between workers through a key/value cache with a TTL.
//! Writers never coordinate; the last write for a key wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::constants::COUNT_CACHE_PREFIX;
use crate::utils::hash_string;

use super::{error::CountError, query::ListingQuery};

/// Key/value store for listing counts
#[async_trait]
pub trait CountCache: Send + Sync {
    /// Stored value for `key`, or `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<i64>, CountError>;

    async fn set(&self, key: &str, value: i64, ttl: Duration) -> Result<(), CountError>;
}

/// Cache key of the count for `query`: `adm:{sha256(signature)}:count`
pub fn count_cache_key(query: &ListingQuery) -> String {
    format!("{}:{}:count", COUNT_CACHE_PREFIX, hash_string(&query.signature()))
}

/// Count cache backed by Redis
#[derive(Clone)]
pub struct RedisCountCache {
    conn: ConnectionManager,
}

impl RedisCountCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CountCache for RedisCountCache {
    async fn get(&self, key: &str) -> Result<Option<i64>, CountError> {
        let mut conn = self.conn.clone();
        let value: Option<i64> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: i64, ttl: Duration) -> Result<(), CountError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)).await?;
        Ok(())
    }
}

/// Process-local count cache. Expired entries are dropped on read and
/// swept on every write.
#[derive(Clone, Default)]
pub struct MemoryCountCache {
    entries: Arc<RwLock<HashMap<String, (i64, Instant)>>>,
}

impl MemoryCountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CountCache for MemoryCountCache {
    async fn get(&self, key: &str) -> Result<Option<i64>, CountError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, expires_at)) if *expires_at > now => return Ok(Some(*value)),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|(_, expires_at)| *expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: i64, ttl: Duration) -> Result<(), CountError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        // Every search term is its own key; expired ones are never read again
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key.to_string(), (value, now + ttl));
        Ok(())
    }
}

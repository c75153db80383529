//! Redis-backed TTL store
//!
//! Values are stored as JSON under `<prefix>:<key>` with `SET ... EX`.
//! `clear` only removes keys under this store's prefix.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::Result;
use crate::storage::{KeyValueStore, StoreValue};

const SCAN_BATCH: usize = 200;

pub struct RedisStore<V> {
    client: redis::Client,
    connection: OnceCell<MultiplexedConnection>,
    prefix: String,
    _value: PhantomData<V>,
}

impl<V: StoreValue> RedisStore<V> {
    /// Create a store; the connection is opened on first use
    pub fn new(url: &str, prefix: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            connection: OnceCell::new(),
            prefix: prefix.to_string(),
            _value: PhantomData,
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let connection = self
            .connection
            .get_or_try_init(|| async {
                debug!("Opening Redis connection for prefix {}", self.prefix);
                self.client.get_multiplexed_async_connection().await
            })
            .await?;
        Ok(connection.clone())
    }
}

#[async_trait]
impl<V: StoreValue> KeyValueStore<V> for RedisStore<V> {
    async fn get(&self, key: &str) -> Result<Option<V>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(self.namespaced(key))
            .query_async(&mut conn)
            .await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        let json = serde_json::to_string(&value)?;
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(self.namespaced(key))
            .arg(json)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("DEL")
            .arg(self.namespaced(key))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let pattern = format!("{}:*", self.prefix);
        let mut cursor: u64 = 0;
        let mut removed = 0usize;
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .cursor_arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;
            if !keys.is_empty() {
                removed += keys.len();
                redis::cmd("DEL")
                    .arg(&keys)
                    .query_async::<_, ()>(&mut conn)
                    .await?;
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }
        debug!("Cleared {} Redis keys under {}", removed, self.prefix);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        let store: RedisStore<String> = RedisStore::new("redis://localhost:6379", "courtside:cls").unwrap();
        assert_eq!(store.namespaced("jokic points"), "courtside:cls:jokic points");
        assert_eq!(store.backend(), "redis");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result: Result<RedisStore<String>> = RedisStore::new("not a url", "p");
        assert!(result.is_err());
    }
}

//! 存储工厂模块
//!
//! 根据配置创建相应的键值存储实例。

use std::sync::Arc;

use tracing::info;

use crate::config::config::CacheConfig;
use crate::error::{AppError, Result};
use crate::storage::{InMemoryStore, KeyValueStore, RedisStore, StoreValue};

/// 存储工厂
pub struct StoreFactory;

impl StoreFactory {
    /// 根据 `cache.backend` 创建存储实例
    ///
    /// `namespace` 用作 Redis 键前缀，进程内后端忽略它。
    pub fn create<V: StoreValue>(config: &CacheConfig, namespace: &str) -> Result<Arc<dyn KeyValueStore<V>>> {
        match config.backend.to_ascii_lowercase().as_str() {
            "memory" => {
                info!("Using in-memory store for {}", namespace);
                Ok(Arc::new(InMemoryStore::<V>::new(config.high_water_mark)))
            }
            "redis" => {
                info!("Using Redis store for {} at {}", namespace, config.redis_url);
                Ok(Arc::new(RedisStore::<V>::new(&config.redis_url, namespace)?))
            }
            other => Err(AppError::Config(format!("未知的缓存后端: {}", other))),
        }
    }
}

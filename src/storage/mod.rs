//! 存储层模块
//!
//! 带 TTL 的键值存储抽象。分类缓存与对话记忆都通过它访问共享状态，
//! 后端可以是进程内哈希表，也可以是 Redis。

pub mod factory;
pub mod memory_store;
pub mod redis_store;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

pub use factory::StoreFactory;
pub use memory_store::{InMemoryStore, StoreStats};
pub use redis_store::RedisStore;

/// 可存入存储的值
pub trait StoreValue: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> StoreValue for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// 带 TTL 的键值存储
#[async_trait]
pub trait KeyValueStore<V: StoreValue>: Send + Sync {
    /// 读取；过期条目视为不存在
    async fn get(&self, key: &str) -> Result<Option<V>>;

    /// 写入并设置 TTL，同键覆盖
    async fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()>;

    /// 删除
    async fn delete(&self, key: &str) -> Result<()>;

    /// 清空本存储命名空间下的所有条目
    async fn clear(&self) -> Result<()>;

    /// 后端名称
    fn backend(&self) -> &'static str;
}

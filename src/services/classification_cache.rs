//! Classification Cache
//!
//! Short-TTL cache of classification results keyed by normalized query text,
//! optionally suffixed with the experiment cohort. Store failures are logged
//! and behave like misses.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::classification::ClassificationResult;
use crate::models::entity::normalize_name;
use crate::storage::KeyValueStore;

/// Cache key: trimmed, case-insensitive query text plus `#<cohort>`
pub fn cache_key(query: &str, cohort: Option<&str>) -> String {
    let normalized = normalize_name(query);
    match cohort {
        Some(cohort) => format!("{}#{}", normalized, cohort),
        None => normalized,
    }
}

pub struct ClassificationCache {
    store: Arc<dyn KeyValueStore<ClassificationResult>>,
    ttl: Duration,
}

impl ClassificationCache {
    pub fn new(store: Arc<dyn KeyValueStore<ClassificationResult>>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub async fn get(&self, key: &str) -> Option<ClassificationResult> {
        match self.store.get(key).await {
            Ok(hit) => {
                debug!("Classification cache {} for {:?}", if hit.is_some() { "hit" } else { "miss" }, key);
                hit
            }
            Err(e) => {
                warn!("Classification cache read failed, treating as miss: {}", e);
                None
            }
        }
    }

    pub async fn put(&self, key: &str, result: &ClassificationResult) {
        if let Err(e) = self.store.set(key, result.clone(), self.ttl).await {
            warn!("Classification cache write failed: {}", e);
        }
    }

    pub async fn clear(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Classification cache clear failed: {}", e);
        }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Read check against the backing store; errors are not swallowed here
    pub async fn ping(&self) -> Result<()> {
        self.store.get("__ping__").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::classification::{ClassificationStage, QueryCategory};
    use crate::models::entity::Sport;
    use crate::storage::InMemoryStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore<ClassificationResult> for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<ClassificationResult>> {
            Err(AppError::Cache("connection refused".into()))
        }
        async fn set(&self, _key: &str, _value: ClassificationResult, _ttl: Duration) -> Result<()> {
            Err(AppError::Cache("connection refused".into()))
        }
        async fn delete(&self, _key: &str) -> Result<()> {
            Err(AppError::Cache("connection refused".into()))
        }
        async fn clear(&self) -> Result<()> {
            Err(AppError::Cache("connection refused".into()))
        }
        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    fn result() -> ClassificationResult {
        ClassificationResult::new(QueryCategory::Standings, Sport::Basketball, 0.9, vec![], ClassificationStage::Pattern)
    }

    #[test]
    fn test_cache_key_normalization() {
        assert_eq!(cache_key("  Jokic   POINTS ", None), "jokic points");
        assert_eq!(cache_key("Jokic points", Some("strict")), "jokic points#strict");
        assert_ne!(cache_key("q", Some("control")), cache_key("q", Some("strict")));
    }

    #[tokio::test]
    async fn test_round_trip() {
        let cache = ClassificationCache::new(Arc::new(InMemoryStore::<ClassificationResult>::new(10)), Duration::from_secs(60));
        cache.put("nba standings", &result()).await;
        assert_eq!(cache.get("nba standings").await, Some(result()));
        cache.clear().await;
        assert_eq!(cache.get("nba standings").await, None);
    }

    #[tokio::test]
    async fn test_store_errors_are_misses() {
        let cache = ClassificationCache::new(Arc::new(BrokenStore), Duration::from_secs(60));
        cache.put("k", &result()).await;
        assert_eq!(cache.get("k").await, None);
        assert!(cache.ping().await.is_err());
        cache.clear().await;
    }
}

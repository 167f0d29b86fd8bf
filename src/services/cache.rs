use std::sync::Arc;
use std::time::Duration;

use crate::models::Problem;
use crate::services::store::{MarketplaceStore, StoreError};

/// In-process cache for the open-problem catalog
///
/// Every recommendation request reads the whole catalog, so it is kept for a
/// short TTL and dropped as soon as a problem is posted.
pub struct CatalogCache {
    cache: moka::future::Cache<String, Arc<Vec<Problem>>>,
}

impl CatalogCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Return the cached open catalog, loading it from the store on a miss
    ///
    /// Store errors are returned as-is and nothing is cached.
    pub async fn open_problems(
        &self,
        store: &dyn MarketplaceStore,
    ) -> Result<Arc<Vec<Problem>>, StoreError> {
        let key = CacheKey::open_problems();

        if let Some(problems) = self.cache.get(&key).await {
            tracing::trace!("Catalog cache hit: {}", key);
            return Ok(problems);
        }

        tracing::trace!("Catalog cache miss: {}", key);
        let problems = Arc::new(store.list_open_problems().await?);
        self.cache.insert(key, problems.clone()).await;

        Ok(problems)
    }

    /// Drop the cached catalog
    pub async fn invalidate(&self) {
        self.cache.invalidate(&CacheKey::open_problems()).await;
        tracing::debug!("Invalidated open problem catalog");
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build the cache key for the open-problem catalog
    pub fn open_problems() -> String {
        "problems:open".to_string()
    }
}

pub mod client;
pub mod memory;
pub mod valkey;

use std::sync::Arc;

pub use client::{CacheClient, CacheError};
pub use memory::MemoryCache;
pub use valkey::ValkeyClient;

/// Open the cache backend selected by config (`None` => in-process).
pub async fn connect(redis_url: Option<&str>) -> Result<Arc<dyn CacheClient>, CacheError> {
    match redis_url {
        Some(url) => Ok(Arc::new(ValkeyClient::new(url).await?)),
        None => {
            tracing::warn!("REDIS_URL is not set; using the in-process memory cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

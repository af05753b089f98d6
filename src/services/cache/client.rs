//! Cache client interface used by higher-level services (rate limits, health, etc.).
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-layer errors (transport/command).
///
/// Note:
/// - We keep this independent from `AppError` so callers can decide how to fail
///   (fail-open for rate limits, "unavailable" for health, etc.).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
}

/// A minimal cache interface.
///
/// Constructed once at start-up and injected through `AppState` as
/// `Arc<dyn CacheClient>`; there is no module-level connection handle.
#[async_trait]
pub trait CacheClient: Debug + Send + Sync + 'static {
    // Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Round-trip to the backend.
    async fn ping(&self) -> CacheResult<()>;

    // Increment a counter, starting its TTL when the key is created.
    //
    // Returns the value after the increment (1 for a fresh key).
    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> CacheResult<u64>;
}

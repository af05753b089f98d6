use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::services::cache::client::{CacheClient, CacheResult};

/// Expired counters are swept at most this often.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Counters {
    entries: HashMap<String, (u64, Instant)>,
    last_sweep: Instant,
}

impl Counters {
    fn sweep_if_due(&mut self, now: Instant) {
        if now.duration_since(self.last_sweep) < SWEEP_INTERVAL {
            return;
        }
        self.entries.retain(|_, (_, expires_at)| *expires_at > now);
        self.last_sweep = now;
    }
}

/// In-process cache used when no `REDIS_URL` is configured (local dev, tests).
///
/// Counters only. An expired counter restarts on its next access, and every
/// expired entry is dropped by a sweep that runs on writes once per
/// `SWEEP_INTERVAL`.
#[derive(Clone, Debug)]
pub struct MemoryCache {
    counters: Arc<Mutex<Counters>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(Mutex::new(Counters {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.counters.lock().await.entries.len()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> CacheResult<u64> {
        let now = Instant::now();
        let mut counters = self.counters.lock().await;
        counters.sweep_if_due(now);

        let entry = counters
            .entries
            .entry(key.to_string())
            .or_insert((0, now + ttl));
        if entry.1 <= now {
            *entry = (0, now + ttl);
        }
        entry.0 += 1;

        Ok(entry.0)
    }
}

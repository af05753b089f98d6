/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - auth: AuthService (read-only secret), cache: CacheClient, rate limit policy, env
 * - Clone is expected to be cheap (Arc / Copy inside)
 */
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppEnv, Config};
use crate::services::{auth::AuthService, cache::CacheClient};

/// Fixed-window limit applied per client address. `max_requests == 0` disables it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub window: Duration,
    pub max_requests: u64,
}

impl RateLimitPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window: config.rate_limit_window,
            max_requests: config.rate_limit_max_requests,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub app_env: AppEnv,
    pub api_version: String,
    pub auth: Arc<AuthService>,
    pub cache: Arc<dyn CacheClient>,
    pub rate_limit: RateLimitPolicy,
}

impl AppState {
    pub fn new(
        app_env: AppEnv,
        api_version: impl Into<String>,
        auth: Arc<AuthService>,
        cache: Arc<dyn CacheClient>,
        rate_limit: RateLimitPolicy,
    ) -> Self {
        Self {
            app_env,
            api_version: api_version.into(),
            auth,
            cache,
            rate_limit,
        }
    }
}

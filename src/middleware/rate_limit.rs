//! Fixed-window request limit per client address.
//!
//! The counter lives in the cache backend (`INCR` + `EXPIRE` on the first hit),
//! so several instances behind one Valkey share the budget.
//! A cache failure lets the request through (fail-open) and is logged.

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

/// Client identity for the counter key: peer address, else first `X-Forwarded-For` hop.
fn client_key(req: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let policy = state.rate_limit;
    if !policy.is_enabled() {
        return Ok(next.run(req).await);
    }

    let key = format!("rate:{}", client_key(&req));

    match state.cache.incr_with_ttl(&key, policy.window).await {
        Ok(count) if count > policy.max_requests => {
            tracing::warn!(key = %key, count, "rate limit exceeded");
            return Err(AppError::too_many_requests());
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(
                error = %err,
                backend = state.cache.backend_name(),
                "rate limit backend failure; letting request through"
            );
        }
    }

    Ok(next.run(req).await)
}

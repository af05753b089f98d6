/*
 * Responsibility
 * - GET /health (liveness, mounted outside the versioned prefix)
 * - Reports cache reachability without failing the health check itself
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header, uri::Authority},
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::state::AppState;

/// Host the client addressed, without the port. IPv6 literals keep their brackets.
fn request_host(headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Authority>().ok())
        .map(|authority| authority.host().to_string())
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

pub async fn health(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let cache = match state.cache.ping().await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, backend = state.cache.backend_name(), "cache ping failed");
            "unavailable"
        }
    };

    Json(json!({
        "success": true,
        "message": format!("Systemize API is running at {}", request_host(&headers)),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "version": state.api_version,
        "environment": state.app_env.as_str(),
        "cache": cache,
    }))
}

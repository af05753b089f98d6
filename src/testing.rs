//! Shared fixtures for in-crate tests: token minting and a router driver.
use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

use crate::app::{build_router, build_state};
use crate::config::Config;

pub const TEST_SECRET: &str = "test-secret";

pub fn sign<T: Serialize>(claims: &T) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// HS256 token expiring `expires_in` seconds from now (negative = already expired).
pub fn token_for(id: &str, email: &str, provider: &str, expires_in: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    sign(&serde_json::json!({
        "id": id,
        "email": email,
        "provider": provider,
        "iat": now,
        "exp": now + expires_in,
    }))
}

pub fn valid_token() -> String {
    token_for("test-user-id", "test@example.com", "google", 3600)
}

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), TEST_SECRET.to_string()),
        ("APP_ENV".to_string(), "development".to_string()),
    ]);
    for (k, v) in vars {
        map.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| map.get(key).cloned()).unwrap()
}

/// Full application router (all layers) over an in-process cache.
pub async fn test_app(vars: &[(&str, &str)]) -> Router {
    let config = test_config(vars);
    let state = build_state(&config).await.unwrap();
    build_router(state, &config)
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

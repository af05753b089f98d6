//! CORS policy for the browser front-end.
//!
//! Policy:
//! - Development: any origin, WITHOUT credentials.
//! - Production: exact-match allowlist from Config (`CORS_ALLOWED_ORIGINS` or
//!   `FRONTEND_URL`), WITH credentials. An empty allowlist allows nothing.
//!
//! tower-http panics on wildcard origin + credentials, so credentials are only
//! switched on together with the allowlist.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

fn allowlist(origins: &[String]) -> AllowOrigin {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    AllowOrigin::predicate(move |origin: &HeaderValue, _req| allowed.iter().any(|v| v == origin))
}

pub fn apply(router: Router, config: &Config) -> Router {
    let base = if config.app_env.is_production() {
        CorsLayer::new()
            .allow_origin(allowlist(&config.cors_allowed_origins))
            .allow_credentials(true)
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    let cors = base
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .max_age(Duration::from_secs(60 * 10));

    router.layer(cors)
}

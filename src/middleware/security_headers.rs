//! Security-related response headers (the usual helmet set).
//!
//! Every header is set only if the handler did not set it already.
//! HSTS is added in production only; local development runs over plain HTTP.

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::AppEnv;

const COMMON: [(&str, &str); 7] = [
    // Clickjacking protection (legacy + modern)
    ("x-frame-options", "DENY"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
    // Prevent MIME sniffing
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    ("cross-origin-opener-policy", "same-origin"),
    ("x-dns-prefetch-control", "off"),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
];

const HSTS: (&str, &str) = ("strict-transport-security", "max-age=15552000; includeSubDomains");

fn set_if_absent(router: Router, (name, value): (&'static str, &'static str)) -> Router {
    router.layer(SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    ))
}

pub fn apply(router: Router, env: AppEnv) -> Router {
    let router = COMMON.into_iter().fold(router, set_if_absent);

    if env.is_production() {
        set_if_absent(router, HSTS)
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Method;

    use super::*;
    use crate::testing::{request, send, test_app};

    #[tokio::test]
    async fn headers_are_set_on_success_and_error_responses() {
        let app = test_app(&[]).await;

        for uri in ["/health", "/api/v1/tasks", "/nowhere"] {
            let (_, headers, _) = send(&app, request(Method::GET, uri, None, None)).await;
            for (name, value) in COMMON {
                assert_eq!(headers[name], value, "{name} on {uri}");
            }
            assert!(headers.get(HSTS.0).is_none());
        }
    }

    #[tokio::test]
    async fn hsts_only_in_production() {
        let app = test_app(&[("APP_ENV", "production")]).await;

        let (_, headers, _) = send(&app, request(Method::GET, "/health", None, None)).await;

        assert_eq!(headers[HSTS.0], HSTS.1);
    }
}

//! Bearer access-token check → `AuthCtx` in the request extensions.
//!
//! - `Authorization: Bearer <jwt>` is required (case-sensitive scheme, one space).
//! - The token is verified once against the shared secret (signature + `exp`).
//! - On success the identity claims are attached and the request continues untouched.
//! - The raw token is never logged.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Protect every route registered on `router` so far.
///
/// Uses `route_layer`, so unknown paths still fall through to the 404 handler
/// instead of answering 401.
///
/// ```ignore
/// let tasks = Router::new().route("/", get(list_tasks));
/// let tasks = middleware::auth::access::apply(tasks, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Syntactic part of the check: header present and starting with `Bearer `.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;

    let claims = match state.auth.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(err.into());
        }
    };

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::from(claims));

    Ok(next.run(req).await)
}

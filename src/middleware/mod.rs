/*
 * Responsibility
 * - Public interface of the middleware layers (each exposes an `apply(...)`)
 * - Ordering is decided in app::build_router, not here
 */
pub mod auth;
pub mod cors;
pub mod error_envelope;
pub mod http;
pub mod rate_limit;
pub mod security_headers;

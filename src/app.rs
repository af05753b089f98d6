/*
 * Responsibility
 * - Config -> shared services -> Router (all layers) -> axum::serve
 * - Process-level concerns: tracing subscriber, panic hook, graceful shutdown
 */
use std::{net::SocketAddr, panic};

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::OriginalUri,
    http::Method,
    routing::get,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::error::{AppError, ErrorResponder};
use crate::middleware::{cors, error_envelope, http, rate_limit, security_headers};
use crate::services::{auth::build_auth_service, cache};
use crate::state::{AppState, RateLimitPolicy};

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,systemize_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Handler panics are answered by the CatchPanicLayer in `middleware::http`;
/// the hook only records them.
fn init_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;
    init_panic_hook();

    tracing::info!(
        env = config.app_env.as_str(),
        addr = %config.addr,
        api_version = %config.api_version,
        "starting Systemize API"
    );

    let state = build_state(&config).await?;
    let cache = state.cache.clone();
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!("health check: http://{}/health", config.addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("serving HTTP")?;

    // Last handle to the cache backend; dropping it closes the connection.
    drop(cache);
    tracing::info!("cache connection closed, bye");

    Ok(())
}

pub(crate) async fn build_state(config: &Config) -> Result<AppState> {
    let auth = build_auth_service(config);
    let cache = cache::connect(config.redis_url.as_deref())
        .await
        .context("connecting to cache backend")?;
    tracing::info!(backend = cache.backend_name(), "cache ready");

    Ok(AppState::new(
        config.app_env,
        config.api_version.clone(),
        auth,
        cache,
        RateLimitPolicy::from_config(config),
    ))
}

pub(crate) fn build_router(state: AppState, config: &Config) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .nest(
            &format!("/api/{}", config.api_version),
            api::v1::routes(state.clone()),
        )
        // Wrong method on a known path is reported like an unknown route
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found);

    apply_layers(routes, state, config)
}

/// Layer order, innermost first:
/// routes -> rate limit -> request id/limits/timeout/trace/panics -> error envelope
/// -> security headers -> CORS.
pub(crate) fn apply_layers(router: Router<AppState>, state: AppState, config: &Config) -> Router {
    let router = rate_limit::apply(router, state.clone());
    let router: Router = router.with_state(state);

    let router = http::apply(router);
    let router = error_envelope::apply(router, ErrorResponder::new(config.app_env));
    let router = security_headers::apply(router, config.app_env);
    cors::apply(router, config)
}

async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found(format!("Route {} {} not found", method, uri.path()))
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(term), Ok(int)) => (term, int),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("failed to register signal handlers: {e}");
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down gracefully"),
        _ = sigint.recv() => tracing::info!("received SIGINT, shutting down gracefully"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await
        }
    }
}

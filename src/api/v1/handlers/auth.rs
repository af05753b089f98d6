/*
 * Responsibility
 * - /auth handlers
 * - signup/login/refresh are public, logout/me sit behind the access middleware
 * - Account flows are not implemented yet; they answer with a placeholder message
 */
use crate::api::{
    response::ApiResponse,
    v1::extractors::{AuthCtx, AuthCtxExtractor},
};

pub async fn signup() -> ApiResponse<()> {
    ApiResponse::message("Signup endpoint - to be implemented")
}

pub async fn login() -> ApiResponse<()> {
    ApiResponse::message("Login endpoint - to be implemented")
}

pub async fn refresh() -> ApiResponse<()> {
    ApiResponse::message("Refresh token endpoint - to be implemented")
}

pub async fn logout(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, "logout");
    ApiResponse::message("Logout endpoint - to be implemented")
}

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<AuthCtx> {
    ApiResponse::ok(ctx)
}

use serde_json::Value;

use crate::api::{
    response::ApiResponse,
    v1::{
        dto::progress::{CompletionStats, ProgressSummary},
        extractors::AuthCtxExtractor,
    },
};

pub async fn get_progress(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<ProgressSummary> {
    tracing::debug!(user_id = %ctx.id, "progress summary");
    ApiResponse::ok(ProgressSummary::initial())
        .with_message("Get user progress endpoint - to be implemented")
}

pub async fn list_badges(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<Vec<Value>> {
    tracing::debug!(user_id = %ctx.id, "earned badges");
    ApiResponse::ok(Vec::new()).with_message("Get earned badges endpoint - to be implemented")
}

pub async fn get_stats(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<CompletionStats> {
    tracing::debug!(user_id = %ctx.id, "completion stats");
    ApiResponse::ok(CompletionStats::empty())
        .with_message("Get completion stats endpoint - to be implemented")
}

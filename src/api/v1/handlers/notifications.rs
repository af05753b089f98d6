/*
 * Responsibility
 * - /notifications handlers (all protected)
 * - Device registration validates its body; delivery itself is not wired yet
 */
use axum::extract::Path;
use serde_json::Value;

use crate::api::{
    response::ApiResponse,
    v1::{
        dto::notifications::RegisterDeviceRequest,
        extractors::{AuthCtxExtractor, ValidatedJson},
    },
};

pub async fn list_notifications(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<Vec<Value>> {
    tracing::debug!(user_id = %ctx.id, "list notifications");
    ApiResponse::ok(Vec::new()).with_message("List notifications endpoint - to be implemented")
}

pub async fn register_device(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ValidatedJson(req): ValidatedJson<RegisterDeviceRequest>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, platform = ?req.platform, "register device token");
    ApiResponse::message("Register device token endpoint - to be implemented")
}

pub async fn mark_read(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(notification_id): Path<String>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, %notification_id, "mark notification read");
    ApiResponse::message("Mark notification as read endpoint - to be implemented")
}

pub async fn delete_notification(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(notification_id): Path<String>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, %notification_id, "delete notification");
    ApiResponse::message("Delete notification endpoint - to be implemented")
}

/*
 * Responsibility
 * - /tasks handlers (all protected)
 * - Bodies go through ValidatedJson so bad payloads already get the 400 envelope;
 *   persistence is not wired yet, so every handler answers with a placeholder
 */
use axum::extract::Path;
use serde_json::Value;

use crate::api::{
    response::ApiResponse,
    v1::{
        dto::tasks::{CreateTaskRequest, UpdateTaskRequest},
        extractors::{AuthCtxExtractor, ValidatedJson},
    },
};

pub async fn list_tasks(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<Vec<Value>> {
    tracing::debug!(user_id = %ctx.id, "list tasks");
    ApiResponse::ok(Vec::new()).with_message("List tasks endpoint - to be implemented")
}

pub async fn create_task(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, category = ?req.category, "create task");
    ApiResponse::message("Create task endpoint - to be implemented")
}

pub async fn upcoming_tasks(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<Vec<Value>> {
    tracing::debug!(user_id = %ctx.id, "upcoming tasks");
    ApiResponse::ok(Vec::new()).with_message("Get upcoming tasks endpoint - to be implemented")
}

pub async fn overdue_tasks(AuthCtxExtractor(ctx): AuthCtxExtractor) -> ApiResponse<Vec<Value>> {
    tracing::debug!(user_id = %ctx.id, "overdue tasks");
    ApiResponse::ok(Vec::new()).with_message("Get overdue tasks endpoint - to be implemented")
}

pub async fn get_task(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(task_id): Path<String>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, %task_id, "get task");
    ApiResponse::message("Get task endpoint - to be implemented")
}

pub async fn update_task(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(task_id): Path<String>,
    ValidatedJson(_req): ValidatedJson<UpdateTaskRequest>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, %task_id, "update task");
    ApiResponse::message("Update task endpoint - to be implemented")
}

pub async fn delete_task(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(task_id): Path<String>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, %task_id, "delete task");
    ApiResponse::message("Delete task endpoint - to be implemented")
}

pub async fn complete_task(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(task_id): Path<String>,
) -> ApiResponse<()> {
    tracing::debug!(user_id = %ctx.id, %task_id, "complete task");
    ApiResponse::message("Complete task endpoint - to be implemented")
}

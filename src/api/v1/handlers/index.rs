use axum::{Json, response::IntoResponse};
use serde_json::json;

/// `GET /api/{version}/`: what is mounted under the prefix.
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Systemize API",
        "version": "1.0.0",
        "endpoints": {
            "auth": "/auth",
            "tasks": "/tasks",
            "progress": "/progress",
            "notifications": "/notifications",
        },
    }))
}

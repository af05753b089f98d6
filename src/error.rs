/*
 * Responsibility
 * - The application-wide error taxonomy (AppError) as a closed set of variants
 * - ErrorResponder: the single place where a failure becomes the wire envelope
 *   `{success:false, error:{code,message,details?}, meta:{timestamp}}`
 * - IntoResponse only stashes the error; middleware::error_envelope renders it
 */
use std::fmt;
use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::AppEnv;
use crate::services::auth::AccessTokenError;

pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// One violated field, `field` is a dotted path (`tags.0.name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Schema-validation failure. Violations keep the order they were found in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// `Ok(())` when nothing was pushed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn to_details(&self) -> Value {
        serde_json::to_value(&self.violations).unwrap_or_default()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid request data ({} violation(s))", self.violations.len())
    }
}

impl std::error::Error for ValidationErrors {}

/// An explicitly classified failure raised by a handler or middleware.
#[derive(Debug, Clone)]
pub struct ApplicationError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl ApplicationError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code: INTERNAL_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    TokenExpired,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Application(ApplicationError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn application(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self::Application(ApplicationError::new(status, message).with_code(code))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::application(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    pub fn too_many_requests() -> Self {
        Self::application(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests",
            "RATE_LIMIT_EXCEEDED",
        )
    }

    pub fn payload_too_large() -> Self {
        Self::application(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload too large",
            "PAYLOAD_TOO_LARGE",
        )
    }

    pub fn request_timeout() -> Self {
        Self::application(
            StatusCode::REQUEST_TIMEOUT,
            "Request timeout",
            "REQUEST_TIMEOUT",
        )
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidToken | AppError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Application(e) => e.status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Application(e) => e.code,
            AppError::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl From<ApplicationError> for AppError {
    fn from(e: ApplicationError) -> Self {
        AppError::Application(e)
    }
}

impl From<AccessTokenError> for AppError {
    fn from(e: AccessTokenError) -> Self {
        match e {
            AccessTokenError::Expired => AppError::TokenExpired,
            // Bad signature, malformed structure, missing/empty claims
            AccessTokenError::Jwt(_) | AccessTokenError::EmptyClaim(_) => AppError::InvalidToken,
        }
    }
}

/// Marker left in the response extensions until the envelope layer renders it.
#[derive(Clone)]
pub struct PendingError(pub Arc<AppError>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut res = self.status().into_response();
        res.extensions_mut().insert(PendingError(Arc::new(self)));
        res
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
    pub meta: ErrorMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    // Development only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorMeta {
    pub timestamp: String,
}

/// Converts any `AppError` into the canonical error envelope.
///
/// Built once at start-up with the process mode; the mode only affects how
/// much of an unclassified fault is shown to the client.
#[derive(Debug, Clone, Copy)]
pub struct ErrorResponder {
    env: AppEnv,
}

impl ErrorResponder {
    pub fn new(env: AppEnv) -> Self {
        Self { env }
    }

    pub fn envelope(&self, err: &AppError) -> (StatusCode, ErrorEnvelope) {
        let (message, details, stack) = match err {
            AppError::Validation(errors) => (
                "Invalid request data".to_string(),
                Some(errors.to_details()),
                None,
            ),
            AppError::Application(e) => (e.message.clone(), e.details.clone(), None),
            AppError::Unauthorized => ("Authentication required".to_string(), None, None),
            AppError::InvalidToken => ("Invalid token".to_string(), None, None),
            AppError::TokenExpired => ("Token expired".to_string(), None, None),
            AppError::Internal(fault) => {
                if self.env.is_production() {
                    ("Internal server error".to_string(), None, None)
                } else {
                    (fault.to_string(), None, Some(format!("{fault:?}")))
                }
            }
        };

        let envelope = ErrorEnvelope {
            success: false,
            error: ErrorBody {
                code: err.code(),
                message,
                details,
                stack,
            },
            meta: ErrorMeta {
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        };

        (err.status(), envelope)
    }

    pub fn respond(&self, err: &AppError) -> Response {
        let (status, envelope) = self.envelope(err);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), code = envelope.error.code, error = ?err, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), code = envelope.error.code, error = %err, "request rejected");
        }

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use chrono::DateTime;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn render(env: AppEnv, err: &AppError) -> (StatusCode, Value) {
        let (status, envelope) = ErrorResponder::new(env).envelope(err);
        (status, serde_json::to_value(envelope).unwrap())
    }

    #[test]
    fn application_error_renders_exact_envelope() {
        let err = AppError::application(StatusCode::NOT_FOUND, "Resource not found", "NOT_FOUND");
        let (status, body) = render(AppEnv::Production, &err);

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
        assert_eq!(
            body["error"],
            json!({ "code": "NOT_FOUND", "message": "Resource not found" })
        );
        assert!(body["meta"]["timestamp"].is_string());
        assert_eq!(body.as_object().unwrap().len(), 3);
        assert_eq!(body["meta"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn application_error_code_defaults_to_internal_error() {
        let err: AppError = ApplicationError::new(StatusCode::CONFLICT, "already done").into();
        let (status, body) = render(AppEnv::Production, &err);

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "already done");
    }

    #[test]
    fn application_error_details_are_passed_through() {
        let err: AppError = ApplicationError::new(StatusCode::BAD_REQUEST, "Invalid input")
            .with_code("VALIDATION_ERROR")
            .with_details(json!({ "field": "email", "issue": "invalid format" }))
            .into();
        let (_, body) = render(AppEnv::Development, &err);

        assert_eq!(
            body["error"]["details"],
            json!({ "field": "email", "issue": "invalid format" })
        );
        assert!(body["error"].get("stack").is_none());
    }

    #[test]
    fn validation_errors_keep_discovery_order() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Invalid email");
        errors.push("profile.age", "Number must be greater than or equal to 0");
        errors.push("tags.1", "Required");

        let (status, body) = render(AppEnv::Production, &AppError::from(errors));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Invalid request data");
        assert_eq!(
            body["error"]["details"],
            json!([
                { "field": "email", "message": "Invalid email" },
                { "field": "profile.age", "message": "Number must be greater than or equal to 0" },
                { "field": "tags.1", "message": "Required" },
            ])
        );
    }

    #[rstest]
    #[case(AppError::Unauthorized, "UNAUTHORIZED", "Authentication required")]
    #[case(AppError::InvalidToken, "INVALID_TOKEN", "Invalid token")]
    #[case(AppError::TokenExpired, "TOKEN_EXPIRED", "Token expired")]
    fn auth_failures_are_401(
        #[case] err: AppError,
        #[case] code: &str,
        #[case] message: &str,
    ) {
        let (status, body) = render(AppEnv::Development, &err);

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!({ "code": code, "message": message }));
    }

    #[test]
    fn internal_fault_is_hidden_in_production() {
        let err = AppError::internal(anyhow::anyhow!("connection refused (db-primary:5432)"));
        let (status, body) = render(AppEnv::Production, &err);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            json!({ "code": "INTERNAL_ERROR", "message": "Internal server error" })
        );
    }

    #[test]
    fn internal_fault_is_described_in_development() {
        let err = Err::<(), _>(anyhow::anyhow!("socket closed"))
            .context("Detailed error message")
            .map_err(AppError::internal)
            .unwrap_err();
        let (_, body) = render(AppEnv::Development, &err);

        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "Detailed error message");
        let stack = body["error"]["stack"].as_str().unwrap();
        assert!(stack.contains("socket closed"));
    }

    #[test]
    fn timestamp_is_recent_rfc3339() {
        let before = Utc::now();
        let (_, body) = render(AppEnv::Production, &AppError::Unauthorized);

        let raw = body["meta"]["timestamp"].as_str().unwrap();
        assert!(raw.ends_with('Z'));
        let ts = DateTime::parse_from_rfc3339(raw).unwrap();
        let age = Utc::now().signed_duration_since(ts);
        assert!(age.num_seconds() < 5);
        // millisecond precision may round below `before`
        assert!(ts.timestamp_millis() >= before.timestamp_millis() - 1);
    }

    #[test]
    fn into_response_defers_rendering() {
        let res = AppError::not_found("nope").into_response();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let pending = res.extensions().get::<PendingError>().unwrap();
        assert_eq!(pending.0.code(), "NOT_FOUND");
    }

    #[test]
    fn into_result_is_ok_only_when_empty() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let err = ValidationErrors::single("title", "Required").into_result().unwrap_err();
        assert_eq!(err.violations().len(), 1);
    }
}

/*
 * Responsibility
 * - Parse a JSON body and build the DTO from it field by field
 * - Failure kinds:
 *   - body over the size limit => 413 PAYLOAD_TOO_LARGE
 *   - unparsable or non-object body => VALIDATION_ERROR, one violation on "body"
 *   - wrong field types / rule violations => VALIDATION_ERROR, one violation
 *     per field, in the order the DTO reads them
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Map, Value};

use crate::error::{AppError, ValidationErrors};

/// Build a request DTO from an already parsed JSON body, reporting every
/// violated field.
pub trait Validate: Sized {
    fn from_value(body: &Value) -> Result<Self, ValidationErrors>;
}

pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        Ok(Self(T::from_value(&body)?))
    }
}

fn body_rejection(rejection: JsonRejection) -> AppError {
    // LengthLimitError from the DefaultBodyLimit in middleware::http
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::payload_too_large();
    }
    ValidationErrors::single("body", rejection.body_text()).into()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed reads over a JSON object body that collect violations as they go.
///
/// ```ignore
/// let mut fields = BodyFields::new(body)?;
/// let title = fields.required_string("title");
/// fields.finish()?;
/// ```
pub struct BodyFields<'a> {
    object: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> BodyFields<'a> {
    pub fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body {
            Value::Object(object) => Ok(Self {
                object,
                errors: ValidationErrors::new(),
            }),
            other => Err(ValidationErrors::single(
                "body",
                format!("Expected object, received {}", kind_of(other)),
            )),
        }
    }

    /// Absent => `None`. Present but not a string => violation.
    pub fn string(&mut self, field: &str) -> Option<&'a str> {
        match self.object.get(field)? {
            Value::String(s) => Some(s.as_str()),
            other => {
                self.errors
                    .push(field, format!("Expected string, received {}", kind_of(other)));
                None
            }
        }
    }

    /// Like `string`, but absence is a "Required" violation.
    pub fn required_string(&mut self, field: &str) -> Option<&'a str> {
        if !self.object.contains_key(field) {
            self.errors.push(field, "Required");
            return None;
        }
        self.string(field)
    }

    pub fn errors(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        self.errors.into_result()
    }
}

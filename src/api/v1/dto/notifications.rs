use serde_json::Value;

use crate::api::v1::extractors::{BodyFields, Validate};
use crate::error::ValidationErrors;

pub const PLATFORMS: &[&str] = &["ios", "android", "web"];

/// Body of `POST /notifications/register` (push device token).
#[derive(Debug)]
pub struct RegisterDeviceRequest {
    pub device_token: String,
    pub platform: Option<String>,
}

impl Validate for RegisterDeviceRequest {
    fn from_value(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = BodyFields::new(body)?;

        let device_token = fields.required_string("deviceToken");
        if device_token.is_some_and(|t| t.trim().is_empty()) {
            fields.errors().push("deviceToken", "Device token is required");
        }
        let platform = fields.string("platform");
        if let Some(p) = platform
            && !PLATFORMS.contains(&p)
        {
            fields.errors().push(
                "platform",
                format!("Invalid enum value. Expected {}, received '{p}'", PLATFORMS.join(" | ")),
            );
        }

        fields.finish()?;

        Ok(Self {
            device_token: device_token.unwrap_or_default().to_string(),
            platform: platform.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_alone_is_enough() {
        let req = RegisterDeviceRequest::from_value(&json!({ "deviceToken": "test-token" })).unwrap();

        assert_eq!(req.device_token, "test-token");
        assert!(req.platform.is_none());
    }

    #[test]
    fn missing_token_and_bad_platform_are_both_reported() {
        let errors = RegisterDeviceRequest::from_value(&json!({ "platform": "symbian" })).unwrap_err();

        let fields: Vec<_> = errors.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["deviceToken", "platform"]);
    }

    #[test]
    fn blank_token_is_rejected() {
        let errors =
            RegisterDeviceRequest::from_value(&json!({ "deviceToken": "  ", "platform": "ios" })).unwrap_err();
        assert_eq!(errors.violations()[0].message, "Device token is required");
    }

    #[test]
    fn numeric_token_is_a_type_violation() {
        let errors = RegisterDeviceRequest::from_value(&json!({ "deviceToken": 42 })).unwrap_err();
        assert_eq!(errors.violations()[0].message, "Expected string, received number");
    }
}

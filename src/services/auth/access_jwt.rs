use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessTokenError {
    Expired,
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
}

impl fmt::Display for AccessTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "access token expired"),
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for AccessTokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessTokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Jwt(e),
        }
    }
}

/// Identity carried by a verified access token.
///
/// The subject is not looked up in any user store here; that belongs to the
/// handlers that need a user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub id: String,
    pub email: String,
    pub provider: String,
}

/// HS256 access-token verifier over the process-wide shared secret.
///
/// - Key material is intentionally not printable via Debug.
/// - Read-only after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // `exp` stays in the required claims and is checked against the clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature + expiry and decode the identity claims.
    ///
    /// Exactly one decode per call, no retries and no state: the same token
    /// always yields the same claims until it expires.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AccessTokenError> {
        let data = jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.id.trim().is_empty() {
            return Err(AccessTokenError::EmptyClaim("id"));
        }
        if claims.email.trim().is_empty() {
            return Err(AccessTokenError::EmptyClaim("email"));
        }
        if claims.provider.trim().is_empty() {
            return Err(AccessTokenError::EmptyClaim("provider"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{TEST_SECRET, sign, token_for};

    fn service() -> AuthService {
        AuthService::new(TEST_SECRET, 0)
    }

    #[test]
    fn valid_token_yields_claims_unmodified() {
        let token = token_for("custom-id", "custom@example.com", "microsoft", 3600);

        let claims = service().verify(&token).unwrap();

        assert_eq!(
            claims,
            IdentityClaims {
                id: "custom-id".into(),
                email: "custom@example.com".into(),
                provider: "microsoft".into(),
            }
        );
    }

    #[test]
    fn decoding_twice_is_idempotent() {
        let token = token_for("test-user-id", "test@example.com", "google", 3600);
        let auth = service();

        let first = auth.verify(&token).unwrap();
        let second = auth.verify(&token).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = token_for("test-user-id", "test@example.com", "google", 3600);

        let err = AuthService::new("another-secret", 0).verify(&token).unwrap_err();

        assert!(matches!(err, AccessTokenError::Jwt(_)), "{err:?}");
    }

    #[test]
    fn garbage_is_invalid() {
        let err = service().verify("invalid.token.here").unwrap_err();
        assert!(matches!(err, AccessTokenError::Jwt(_)), "{err:?}");
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let token = token_for("test-user-id", "test@example.com", "google", -3600);

        let err = service().verify(&token).unwrap_err();

        assert!(matches!(err, AccessTokenError::Expired), "{err:?}");
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let token = token_for("test-user-id", "test@example.com", "google", -30);

        assert!(AuthService::new(TEST_SECRET, 60).verify(&token).is_ok());
    }

    #[test]
    fn missing_exp_is_invalid() {
        let token = sign(&json!({
            "id": "test-user-id",
            "email": "test@example.com",
            "provider": "google",
        }));

        let err = service().verify(&token).unwrap_err();

        assert!(matches!(err, AccessTokenError::Jwt(_)), "{err:?}");
    }

    #[test]
    fn missing_identity_field_is_invalid() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = sign(&json!({ "id": "test-user-id", "email": "test@example.com", "exp": exp }));

        let err = service().verify(&token).unwrap_err();

        assert!(matches!(err, AccessTokenError::Jwt(_)), "{err:?}");
    }

    #[test]
    fn empty_identity_field_is_invalid() {
        let token = token_for("test-user-id", "", "google", 3600);

        let err = service().verify(&token).unwrap_err();

        assert!(matches!(err, AccessTokenError::EmptyClaim("email")), "{err:?}");
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let printed = format!("{:?}", service());
        assert!(!printed.contains(TEST_SECRET));
    }
}

/*
 * Responsibility
 * - The "authenticated context" type as seen by handlers
 * - middleware verifies the token and stores this in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Token verification lives in services::auth / middleware::auth
 * - Request-scoped: created per request, never shared or persisted
 */
use serde::Serialize;

use crate::services::auth::IdentityClaims;

/// Identity attached to an authenticated request.
///
/// Exactly the three claims from the token, unmodified. Whether `id` exists in
/// a user store is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub id: String,
    pub email: String,
    pub provider: String,
}

impl From<IdentityClaims> for AuthCtx {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            provider: claims.provider,
        }
    }
}

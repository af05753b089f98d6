/*
 * Responsibility
 * - Request extractors used by v1 handlers
 *   - auth_ctx: the identity attached by middleware::auth::access
 *   - validated_json: JSON body + DTO validation into VALIDATION_ERROR
 */
mod auth_ctx;
mod validated_json;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use validated_json::{BodyFields, Validate, ValidatedJson};

pub mod access_jwt;
pub mod factory;

pub use access_jwt::{AccessTokenError, AuthService, IdentityClaims};
pub use factory::build_auth_service;

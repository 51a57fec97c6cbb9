//! Authentication service - Verifies bearer tokens from the identity provider.
//!
//! Tokens are issued elsewhere and signed with a shared HS256 secret;
//! this service only checks them and turns their claims into an `Actor`.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::Actor;
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for Actor {
    fn from(claims: Claims) -> Self {
        Actor::new(claims.sub, claims.username).with_name(claims.first_name, claims.last_name)
    }
}

/// Authentication service trait for dependency injection.
pub trait AuthService: Send + Sync {
    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl AuthService for Authenticator {
    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

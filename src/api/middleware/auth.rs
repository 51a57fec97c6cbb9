//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::Actor;
use crate::errors::AppError;

/// Authenticated caller extracted from the JWT token.
///
/// Handlers take it as `Extension<CurrentUser>` and pass the inner `Actor`
/// explicitly into every service call that records authorship.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Actor);

impl CurrentUser {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;
    tracing::debug!(user_id = claims.sub, "Request authenticated");

    request.extensions_mut().insert(CurrentUser(Actor::from(claims)));

    Ok(next.run(request).await)
}

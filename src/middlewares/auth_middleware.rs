use axum::{http::{header, Request}, middleware::Next, response::Response, extract::State, body::Body};
use std::sync::Arc;
use tracing::debug;
use crate::util::error::HandlerError;
use crate::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Verifies the bearer token and stores its [`Claims`] in the request extensions.
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HandlerError::unauthorized("No token"))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::unauthorized("No token"))?;

    let claims = state.jwt_utils.validate_token(&token).map_err(|e| {
        debug!("Auth verify error: {}", e);
        HandlerError::unauthorized("Invalid token")
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Must run after [`require_auth`].
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, HandlerError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| HandlerError::unauthorized("No token"))?;
    if !claims.is_admin() {
        debug!(user = %claims.sub, "Admin route refused");
        return Err(HandlerError::forbidden("Admin only"));
    }
    Ok(next.run(req).await)
}

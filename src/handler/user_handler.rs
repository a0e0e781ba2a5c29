use axum::{extract::{State, Json}, http::StatusCode, response::IntoResponse, Extension};
use crate::dto::MessageResponse;
use crate::dto::user_dto::{LoginRequest, LogoutResponse, SignupRequest};
use crate::service::user_service::UserService;
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;
use std::sync::Arc;
use validator::Validate;

pub type UserServiceState = Arc<dyn UserService>;

pub async fn signup_handler(
    State(service): State<UserServiceState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = payload.normalized();
    payload.validate().map_err(HandlerError::validation)?;
    service.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Signup successful"))))
}

pub async fn login_handler(
    State(service): State<UserServiceState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let identifier = payload.identifier();
    let password = payload.password.as_deref().filter(|p| !p.is_empty());
    let (Some(identifier), Some(password)) = (identifier, password) else {
        return Err(HandlerError::bad_request("email (or username) and password required"));
    };
    let res = service.login(identifier, password).await?;
    Ok(Json(res))
}

pub async fn me_handler(
    State(service): State<UserServiceState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = service.current_user(&claims.sub).await?;
    Ok(Json(user))
}

/// Tokens are not revoked; the client just drops its copy.
pub async fn logout_handler() -> impl IntoResponse {
    Json(LogoutResponse { ok: true })
}

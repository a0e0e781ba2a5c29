use axum::{Router, routing::{post, get}, middleware};
use crate::handler::user_handler::{
    signup_handler,
    login_handler,
    me_handler,
    logout_handler,
    UserServiceState,
};
use std::sync::Arc;
use crate::middlewares::auth_middleware::{require_auth, AuthState};

/// Mounted at the root and again under `/api/auth`.
pub fn user_router(service: UserServiceState, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler));

    let authed = Router::new()
        .route("/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    public
        .merge(authed)
        .with_state(service)
}

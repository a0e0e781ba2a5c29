use axum::{Router, routing::{post, get, put}, middleware};
use crate::handler::course_handler::{
    list_courses_handler,
    create_course_handler,
    update_course_handler,
    delete_course_handler,
    CourseServiceState,
};
use std::sync::Arc;
use crate::middlewares::auth_middleware::{require_admin, require_auth, AuthState};

/// Mounted at the root and again under `/api`.
pub fn course_router(service: CourseServiceState, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/courses", get(list_courses_handler));

    // Layers run bottom-up: authenticate first, then check the role.
    let admin = Router::new()
        .route("/courses", post(create_course_handler))
        .route("/courses/{id}", put(update_course_handler).delete(delete_course_handler))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    public
        .merge(admin)
        .with_state(service)
}

/// Older clients read the catalog from `/api/allCourses`.
pub fn legacy_course_router(service: CourseServiceState) -> Router {
    Router::new()
        .route("/api/allCourses", get(list_courses_handler))
        .with_state(service)
}

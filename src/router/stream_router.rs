use axum::{Router, routing::get};
use crate::handler::stream_handler::course_stream_handler;
use crate::util::events::CourseEvents;

pub fn stream_router(events: CourseEvents) -> Router {
    Router::new()
        .route("/api/stream", get(course_stream_handler))
        .with_state(events)
}

pub mod course_router;
pub mod stream_router;
pub mod user_router;

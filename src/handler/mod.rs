pub mod course_handler;
pub mod stream_handler;
pub mod user_handler;

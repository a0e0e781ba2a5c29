pub mod course_service;
pub mod user_service;

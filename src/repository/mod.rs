pub mod course_repo;
pub mod mongo;
pub mod repository_error;
pub mod user_repo;

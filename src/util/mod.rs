pub mod error;
pub mod events;
pub mod jwt;
pub mod logger;
pub mod password;

//! Catalog client: keeps a working copy of the course list, filters it and
//! keeps it fresh by polling and, when available, the server-push stream.

pub mod api;
pub mod catalog;
pub mod demo;
pub mod session;
pub mod sync;
pub mod view;

pub use api::{AuthApi, CatalogApi, HttpCatalogApi};
pub use catalog::{apply_filter_and_search, Filter, Rendered, PLACEHOLDER};
pub use session::{Session, SessionStore};
pub use sync::CatalogSync;
pub use view::{CatalogView, TerminalView};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Push stream error: {0}")]
    Stream(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("Not logged in")]
    NotLoggedIn,
}

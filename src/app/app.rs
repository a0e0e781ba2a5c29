use axum::{Router, routing::get};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigError, JwtConfig, MongoConfig, StoreKind};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::course_repo::{CourseRepository, InMemoryCourseRepository, MongoCourseRepository};
use crate::repository::mongo;
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::{InMemoryUserRepository, MongoUserRepository, UserRepository};
use crate::router::course_router::{course_router, legacy_course_router};
use crate::router::stream_router::stream_router;
use crate::router::user_router::user_router;
use crate::service::course_service::{CourseService, CourseServiceImpl};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::events::CourseEvents;
use crate::util::jwt::JwtTokenUtilsImpl;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Invalid listen address: {0}")]
    Address(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<dyn UserService>,
    pub course_service: Arc<dyn CourseService>,
    pub events: CourseEvents,
}

impl App {
    /// Builds the application from environment configuration.
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;

        let (user_repo, course_repo): (Arc<dyn UserRepository>, Arc<dyn CourseRepository>) =
            match config.store {
                StoreKind::Mongo => {
                    let mongo_config = MongoConfig::from_env()?;
                    let db = mongo::connect(&mongo_config).await?;
                    let users = MongoUserRepository::new(&db, &mongo_config.user_collection).await?;
                    let courses = MongoCourseRepository::new(&db, &mongo_config.course_collection);
                    (Arc::new(users), Arc::new(courses))
                }
                StoreKind::Memory => {
                    warn!("Using in-memory store, data is lost on shutdown");
                    (Arc::new(InMemoryUserRepository::new()), Arc::new(InMemoryCourseRepository::new()))
                }
            };

        Ok(Self::with_repositories(config, jwt_config, user_repo, course_repo))
    }

    pub fn with_repositories(
        config: AppConfig,
        jwt_config: JwtConfig,
        user_repo: Arc<dyn UserRepository>,
        course_repo: Arc<dyn CourseRepository>,
    ) -> Self {
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let events = CourseEvents::new();
        let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(user_repo, jwt_utils.clone()));
        let course_service: Arc<dyn CourseService> = Arc::new(CourseServiceImpl::new(course_repo, events.clone()));

        let router = build_router(user_service.clone(), course_service.clone(), events.clone(), jwt_utils);
        App { config, router, user_service, course_service, events }
    }

    /// In-memory application, used by the integration tests.
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        let config = AppConfig { store: StoreKind::Memory, ..AppConfig::default() };
        Self::with_repositories(
            config,
            jwt_config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCourseRepository::new()),
        )
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> Result<(), AppError> {
        let ip: IpAddr = self
            .config
            .host
            .parse()
            .map_err(|_| AppError::Address(self.config.host.clone()))?;
        let addr = SocketAddr::new(ip, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

/// Every route, with its aliases, mounted on shared handlers.
pub fn build_router(
    user_service: Arc<dyn UserService>,
    course_service: Arc<dyn CourseService>,
    events: CourseEvents,
    jwt_utils: Arc<JwtTokenUtilsImpl>,
) -> Router {
    let auth_state = Arc::new(AuthState { jwt_utils });

    Router::new()
        .merge(user_router(user_service.clone(), auth_state.clone()))
        .nest("/api/auth", user_router(user_service, auth_state.clone()))
        .merge(course_router(course_service.clone(), auth_state.clone()))
        .nest("/api", course_router(course_service.clone(), auth_state))
        .merge(legacy_course_router(course_service))
        .merge(stream_router(events))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

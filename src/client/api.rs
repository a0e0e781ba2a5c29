use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::stream::{BoxStream, StreamExt};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::sync::Arc;
use tracing::debug;

use crate::client::ClientError;
use crate::dto::MessageResponse;
use crate::dto::course_dto::CourseResponse;
use crate::dto::user_dto::{LoginRequest, LoginResponse, LogoutResponse, SignupRequest, UserResponse};
use crate::util::events::COURSE_ADDED_EVENT;

pub type CourseStream = BoxStream<'static, Result<CourseResponse, ClientError>>;

/// Course reads used by the sync loop.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<CourseResponse>, ClientError>;
    /// Opens the push stream; yields one item per `course_added` event.
    async fn subscribe(&self) -> Result<CourseStream, ClientError>;
}

/// Account calls made on behalf of the user.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, ClientError>;
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError>;
    async fn me(&self, token: &str) -> Result<UserResponse, ClientError>;
    async fn logout(&self) -> Result<LogoutResponse, ClientError>;
}

/// HTTP client for the catalog service
#[derive(Clone)]
pub struct HttpCatalogApi {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read body".to_string());
    Err(ClientError::Status { status, body })
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_courses(&self) -> Result<Vec<CourseResponse>, ClientError> {
        let response = self.client.get(self.url("/api/courses")).send().await?;
        let courses = check_status(response).await?.json().await?;
        Ok(courses)
    }

    async fn subscribe(&self) -> Result<CourseStream, ClientError> {
        let response = self
            .client
            .get(self.url("/api/stream"))
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let response = check_status(response).await?;
        debug!("Push stream opened");

        let stream = response
            .bytes_stream()
            .eventsource()
            .filter_map(|event| async move {
                match event {
                    Ok(event) if event.event == COURSE_ADDED_EVENT => {
                        Some(serde_json::from_str::<CourseResponse>(&event.data).map_err(ClientError::from))
                    }
                    Ok(_) => None,
                    Err(e) => Some(Err(ClientError::Stream(e.to_string()))),
                }
            });
        Ok(stream.boxed())
    }
}

#[async_trait]
impl AuthApi for HttpCatalogApi {
    #[tracing::instrument(skip(self, request))]
    async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, ClientError> {
        let response = self.client.post(self.url("/api/auth/signup")).json(request).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    #[tracing::instrument(skip(self, request))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let response = self.client.post(self.url("/api/auth/login")).json(request).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    #[tracing::instrument(skip(self, token))]
    async fn me(&self, token: &str) -> Result<UserResponse, ClientError> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn logout(&self) -> Result<LogoutResponse, ClientError> {
        let response = self.client.post(self.url("/api/auth/logout")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::client::api::AuthApi;
use crate::client::ClientError;
use crate::dto::user_dto::{LoginRequest, LoginResponse, UserSummary};

/// Token and last-seen profile. The profile is a display cache only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserSummary>,
}

/// JSON file holding the current [`Session`].
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty session.
    pub fn load(&self) -> Result<Session, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Logs in and remembers the token and profile.
    pub async fn login(&self, api: &dyn AuthApi, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let response = api.login(request).await?;
        self.save(&Session {
            token: Some(response.token.clone()),
            user: Some(response.user.clone()),
        })?;
        Ok(response)
    }

    /// Asks the server first and falls back to the cached profile.
    pub async fn current_user(&self, api: &dyn AuthApi) -> Result<Option<UserSummary>, ClientError> {
        let mut session = self.load()?;
        let Some(token) = session.token.clone() else {
            return Ok(session.user);
        };

        match api.me(&token).await {
            Ok(me) => {
                let user = UserSummary::from(me);
                session.user = Some(user.clone());
                self.save(&session)?;
                Ok(Some(user))
            }
            Err(e) => {
                debug!("Profile refresh failed, using cached user: {}", e);
                Ok(session.user)
            }
        }
    }

    /// Tells the server (best effort) and forgets the session.
    pub async fn logout(&self, api: &dyn AuthApi) -> Result<(), ClientError> {
        if let Err(e) = api.logout().await {
            warn!("Logout request failed: {}", e);
        }
        self.clear()
    }
}

use crate::model::user::{Role, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    pub role: Option<Role>,
}

impl SignupRequest {
    /// Trims identity fields and lowercases the email, so validation sees stored values.
    pub fn normalized(self) -> Self {
        SignupRequest {
            email: User::normalize_email(self.email.as_deref()),
            username: User::normalize_username(self.username.as_deref()),
            ..self
        }
    }
}

/// Either `email` or `username` identifies the account; both are looked up
/// against both stored fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn identifier(&self) -> Option<&str> {
        [self.email.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Public part of a user handed back at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub username: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// Stored user without the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<UserResponse> for UserSummary {
    fn from(user: UserResponse) -> Self {
        UserSummary {
            name: user.name,
            email: user.email,
            role: user.role,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

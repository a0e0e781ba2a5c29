use tracing::{info, error, instrument};
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::UserRepository;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtilsImpl, PasswordUtils};
use crate::dto::user_dto::{LoginResponse, SignupRequest, UserResponse, UserSummary};
use crate::model::user::User;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> Result<User, ServiceError>;
    /// `identifier` is matched against the username as given and the email case-insensitively.
    async fn login(&self, identifier: &str, password: &str) -> Result<LoginResponse, ServiceError>;
    async fn current_user(&self, user_id: &str) -> Result<UserResponse, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { user_repo, jwt_utils }
    }
}

const DUPLICATE_IDENTITY: &str = "Email or username already registered";

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(email = ?request.email, username = ?request.username))]
    async fn signup(&self, request: SignupRequest) -> Result<User, ServiceError> {
        info!("Registering new user");
        let email = User::normalize_email(request.email.as_deref());
        let username = User::normalize_username(request.username.as_deref());
        if email.is_none() && username.is_none() {
            return Err(ServiceError::InvalidInput("email or username is required".to_string()));
        }

        let existing = self.user_repo.find_by_identity(email.as_deref(), username.as_deref()).await?;
        if existing.is_some() {
            info!("Signup rejected, identity already taken");
            return Err(ServiceError::Conflict(DUPLICATE_IDENTITY.to_string()));
        }

        let password_hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            username,
            name: request.name.trim().to_string(),
            email,
            password_hash,
            role: request.role.unwrap_or_default(),
            created_at: None,
        };

        match self.user_repo.insert(user).await {
            Ok(inserted) => {
                info!("User inserted successfully");
                Ok(inserted)
            }
            // Lost a race against a concurrent signup; the unique index caught it.
            Err(RepositoryError::AlreadyExists(_)) => {
                info!("Signup rejected by unique index");
                Err(ServiceError::Conflict(format!("{} (index conflict)", DUPLICATE_IDENTITY)))
            }
            Err(e) => {
                error!("Failed to insert user: {e}");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, password))]
    async fn login(&self, identifier: &str, password: &str) -> Result<LoginResponse, ServiceError> {
        info!("User login attempt");
        let email = User::normalize_email(Some(identifier));
        let username = User::normalize_username(Some(identifier));

        let user = self
            .user_repo
            .find_by_identity(email.as_deref(), username.as_deref())
            .await?
            .ok_or_else(|| {
                info!("User not found for login");
                ServiceError::NotFound("User not found".to_string())
            })?;

        let valid = PasswordUtilsImpl::verify_password(password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            info!("Invalid credentials");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
        let token = self
            .jwt_utils
            .generate_token(&user_id, user.role, &user.name, user.email.as_deref())
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        info!("User logged in successfully");
        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: UserSummary::from(&user),
        })
    }

    #[instrument(skip(self))]
    async fn current_user(&self, user_id: &str) -> Result<UserResponse, ServiceError> {
        let id = ObjectId::parse_str(user_id)
            .map_err(|_| ServiceError::Unauthorized("Invalid token subject".to_string()))?;
        let user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
        Ok(UserResponse::from(user))
    }
}

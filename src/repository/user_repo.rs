use crate::model::user::User;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    /// First user whose email or username equals the given (already normalized) value.
    /// Returns `None` when both are absent.
    async fn find_by_identity(&self, email: Option<&str>, username: Option<&str>) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
}

fn identity_filter(email: Option<&str>, username: Option<&str>) -> Option<Document> {
    let mut clauses = Vec::new();
    if let Some(email) = email {
        clauses.push(doc! { "email": email });
    }
    if let Some(username) = username {
        clauses.push(doc! { "username": username });
    }
    if clauses.is_empty() {
        None
    } else {
        Some(doc! { "$or": clauses })
    }
}

fn stamp_new(mut user: User) -> User {
    user.id = Some(ObjectId::new());
    user.created_at = Some(chrono::Utc::now().to_rfc3339());
    user
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub async fn new(db: &Database, collection_name: &str) -> RepositoryResult<Self> {
        let repo = MongoUserRepository {
            collection: db.collection::<User>(collection_name),
        };
        repo.ensure_indexes().await?;
        Ok(repo)
    }

    /// Unique, sparse: documents without the field do not collide.
    async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let unique_sparse = || IndexOptions::builder().unique(true).sparse(true).build();
        let indexes = vec![
            IndexModel::builder().keys(doc! { "email": 1 }).options(unique_sparse()).build(),
            IndexModel::builder().keys(doc! { "username": 1 }).options(unique_sparse()).build(),
        ];
        self.collection.create_indexes(indexes, None).await.map_err(|e| {
            error!("Failed to create user indexes: {}", e);
            RepositoryError::from(e)
        })?;
        info!("User indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(email = ?user.email, username = ?user.username))]
    async fn insert(&self, user: User) -> RepositoryResult<User> {
        let user = stamp_new(user);
        match self.collection.insert_one(&user, None).await {
            Ok(_) => {
                info!("User inserted");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn find_by_identity(&self, email: Option<&str>, username: Option<&str>) -> RepositoryResult<Option<User>> {
        let Some(filter) = identity_filter(email, username) else {
            return Ok(None);
        };
        self.collection.find_one(filter, None).await.map_err(|e| {
            error!("Failed to find user by identity: {}", e);
            RepositoryError::database(format!("Failed to find user: {}", e))
        })
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        self.collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))
    }
}

/// Process-local store with the same uniqueness rules as the MongoDB indexes.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_identity(user: &User, email: Option<&str>, username: Option<&str>) -> bool {
    let email_hit = email.is_some() && user.email.as_deref() == email;
    let username_hit = username.is_some() && user.username.as_deref() == username;
    email_hit || username_hit
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> RepositoryResult<User> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| matches_identity(u, user.email.as_deref(), user.username.as_deref()))
        {
            return Err(RepositoryError::already_exists("Duplicate key: email or username"));
        }
        let user = stamp_new(user);
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_identity(&self, email: Option<&str>, username: Option<&str>) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| matches_identity(u, email, username)).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }
}

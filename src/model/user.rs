use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored user document. Missing `username`/`email` are left out of the
/// document entirely so the sparse unique indexes ignore them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// Normalizes identity fields the way they are stored: trimmed, email lowercased,
    /// blanks dropped.
    pub fn normalize_username(username: Option<&str>) -> Option<String> {
        username.map(str::trim).filter(|u| !u.is_empty()).map(str::to_string)
    }

    pub fn normalize_email(email: Option<&str>) -> Option<String> {
        email.map(str::trim).filter(|e| !e.is_empty()).map(str::to_lowercase)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub fullname: String,
    pub email: String,
    // Hash only; the plaintext is never persisted. None for accounts
    // provisioned without a password.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub fullname: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CustomerSummary {
    pub fullname: String,
    pub email: String,
}

/// Identity resolved by the authentication middleware and attached to the
/// request as an extension.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub fullname: String,
    pub email: String,
}

//! User entity model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone: String,
    pub organization: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub newsletter_subscribed: bool,
    pub newsletter_preferences: serde_json::Value,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// `"First Last"`, falling back to the username when both are blank.
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Safe user representation for API responses (no password hash, no
/// lockout bookkeeping).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub phone: String,
    pub organization: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub newsletter_subscribed: bool,
    pub newsletter_preferences: serde_json::Value,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            phone: user.phone,
            organization: user.organization,
            bio: user.bio,
            avatar_url: user.avatar_url,
            is_verified: user.is_verified,
            is_active: user.is_active,
            newsletter_subscribed: user.newsletter_subscribed,
            newsletter_preferences: user.newsletter_preferences,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Compact author/manager reference embedded in other resources.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

/// DTO for creating a new user. The password is hashed by the caller.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone: String,
    pub organization: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub newsletter_subscribed: Option<bool>,
    pub newsletter_preferences: Option<serde_json::Value>,
    /// Admin only.
    pub role: Option<String>,
    /// Admin only.
    pub is_active: Option<bool>,
    /// Admin only.
    pub is_verified: Option<bool>,
}

/// Query parameters for the user list.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub role: Option<String>,
    pub search: Option<String>,
}

//! Repository for the `users` table.

use bns_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserQuery, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, username, password_hash, first_name, last_name, role, phone, \
                       organization, bio, avatar_url, is_verified, is_active, \
                       newsletter_subscribed, \
                       newsletter_preferences, failed_login_count, locked_until, last_login_at, \
                       created_at, updated_at";

/// Filter shared by `list` and `count`. `$1` role, `$2` ILIKE pattern.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR role = $1)
                        AND ($2::TEXT IS NULL OR email ILIKE $2 OR username ILIKE $2
                             OR first_name ILIKE $2 OR last_name ILIKE $2)";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, username, password_hash, first_name, last_name, role,
                                phone, organization)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.role)
            .bind(&input.phone)
            .bind(&input.organization)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List users matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &UserQuery,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&params.role)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count users matching the filter.
    pub async fn count(
        pool: &PgPool,
        params: &UserQuery,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM users {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&params.role)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                organization = COALESCE($5, organization),
                bio = COALESCE($6, bio),
                avatar_url = COALESCE($7, avatar_url),
                newsletter_subscribed = COALESCE($8, newsletter_subscribed),
                newsletter_preferences = COALESCE($9, newsletter_preferences),
                role = COALESCE($10, role),
                is_active = COALESCE($11, is_active),
                is_verified = COALESCE($12, is_verified)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.organization)
            .bind(&input.bio)
            .bind(&input.avatar_url)
            .bind(input.newsletter_subscribed)
            .bind(&input.newsletter_preferences)
            .bind(&input.role)
            .bind(input.is_active)
            .bind(input.is_verified)
            .fetch_optional(pool)
            .await
    }

    /// Summary used when a user is embedded as an author.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, first_name, last_name, avatar_url FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Co-authors credited on a blog post.
    pub async fn co_authors(pool: &PgPool, post_id: DbId) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.username, u.first_name, u.last_name, u.avatar_url
             FROM users u JOIN post_co_authors pca ON pca.user_id = u.id
             WHERE pca.post_id = $1
             ORDER BY u.username",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    /// Permanently delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter and return the new count.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Lock an account until the given timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset lockout bookkeeping and stamp the login time.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = 0, locked_until = NULL, last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}

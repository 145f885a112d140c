//! Repository for the `site_settings` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::site_setting::{CreateSiteSetting, SettingQuery, SiteSetting, UpdateSiteSetting};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, value, value_type, category, description, is_public, created_at, \
                       updated_at";

/// `$1` category, `$2` true restricts to public settings.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR category = $1) AND (NOT $2 OR is_public)";

/// Provides CRUD operations for key/value site settings.
pub struct SiteSettingRepo;

impl SiteSettingRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSiteSetting,
    ) -> Result<SiteSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_settings (key, value, value_type, category, description, is_public)
             VALUES ($1, $2, COALESCE($3, 'text'), COALESCE($4, 'general'), COALESCE($5, ''),
                COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(&input.key)
            .bind(&input.value)
            .bind(&input.value_type)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE id = $1");
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List settings ordered by category then key.
    pub async fn list(
        pool: &PgPool,
        filter: &SettingQuery,
        public_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SiteSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_settings {FILTER}
             ORDER BY category, key
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(&filter.category)
            .bind(public_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        filter: &SettingQuery,
        public_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM site_settings {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.category)
            .bind(public_only)
            .fetch_one(pool)
            .await
    }

    /// Every setting matching the filter, unpaginated.
    pub async fn all(
        pool: &PgPool,
        category: Option<&str>,
        public_only: bool,
    ) -> Result<Vec<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings {FILTER} ORDER BY category, key");
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(category)
            .bind(public_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSiteSetting,
    ) -> Result<Option<SiteSetting>, sqlx::Error> {
        let query = format!(
            "UPDATE site_settings SET
                value = COALESCE($2, value),
                value_type = COALESCE($3, value_type),
                category = COALESCE($4, category),
                description = COALESCE($5, description),
                is_public = COALESCE($6, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(id)
            .bind(&input.value)
            .bind(&input.value_type)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM site_settings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

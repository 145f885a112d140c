//! Repository for the `page_views` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::page_view::{CreatePageView, PageView, PageViewQuery, PathCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, path, content_type, content_id, user_id, session_id, ip_address, \
                       user_agent, referrer, device_type, browser, os, country, city, created_at";

/// `$1` content type, `$2`/`$3` inclusive date bounds on `created_at`.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR content_type = $1)
      AND ($2::DATE IS NULL OR created_at::DATE >= $2)
      AND ($3::DATE IS NULL OR created_at::DATE <= $3)";

/// Provides recording and reporting over page views.
pub struct PageViewRepo;

impl PageViewRepo {
    pub async fn create(pool: &PgPool, input: &CreatePageView) -> Result<PageView, sqlx::Error> {
        let query = format!(
            "INSERT INTO page_views (url, path, content_type, content_id, user_id, session_id,
                ip_address, user_agent, referrer, device_type, browser, os, country, city)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageView>(&query)
            .bind(&input.url)
            .bind(&input.path)
            .bind(&input.content_type)
            .bind(input.content_id)
            .bind(input.user_id)
            .bind(&input.session_id)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(&input.referrer)
            .bind(&input.device_type)
            .bind(&input.browser)
            .bind(&input.os)
            .bind(&input.country)
            .bind(&input.city)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PageView>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM page_views WHERE id = $1");
        sqlx::query_as::<_, PageView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List views, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PageViewQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PageView>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_views {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, PageView>(&query)
            .bind(&filter.content_type)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &PageViewQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM page_views {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.content_type)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_views WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total views and views within the last `window_days` days.
    pub async fn totals(pool: &PgPool, window_days: i64) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE created_at >= NOW() - make_interval(days => $1::INT))
             FROM page_views",
        )
        .bind(window_days)
        .fetch_one(pool)
        .await
    }

    /// Most viewed paths, busiest first.
    pub async fn top_paths(pool: &PgPool, limit: i64) -> Result<Vec<PathCount>, sqlx::Error> {
        sqlx::query_as::<_, PathCount>(
            "SELECT path, COUNT(*) AS views FROM page_views
             GROUP BY path
             ORDER BY views DESC, path
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}

//! Repository for the `news_items` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::news_item::{CreateNewsItem, NewsItem, UpdateNewsItem};
use crate::repositories::support::available_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, content, source_url, is_breaking, published_at, \
                       expires_at, created_at, updated_at";

/// `$1` true hides expired items, `$2` restricts to breaking news.
const FILTER: &str = "WHERE (NOT $1 OR expires_at IS NULL OR expires_at > NOW())
      AND (NOT $2 OR is_breaking)";

/// Provides CRUD operations for news items.
pub struct NewsItemRepo;

impl NewsItemRepo {
    /// Insert a news item published now. A missing slug is derived from the title.
    pub async fn create(pool: &PgPool, input: &CreateNewsItem) -> Result<NewsItem, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "news_items", &input.title).await?,
        };
        let query = format!(
            "INSERT INTO news_items (title, slug, content, source_url, is_breaking, expires_at)
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, false), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.content)
            .bind(&input.source_url)
            .bind(input.is_breaking)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        current_only: bool,
    ) -> Result<Option<NewsItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news_items {FILTER} AND id = $3");
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(current_only)
            .bind(false)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items, newest first.
    pub async fn list(
        pool: &PgPool,
        current_only: bool,
        breaking_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news_items {FILTER}
             ORDER BY published_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(current_only)
            .bind(breaking_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        current_only: bool,
        breaking_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM news_items {FILTER}");
        sqlx::query_scalar(&query)
            .bind(current_only)
            .bind(breaking_only)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNewsItem,
    ) -> Result<Option<NewsItem>, sqlx::Error> {
        let query = format!(
            "UPDATE news_items SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                source_url = COALESCE($5, source_url),
                is_breaking = COALESCE($6, is_breaking),
                expires_at = COALESCE($7, expires_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.source_url)
            .bind(input.is_breaking)
            .bind(input.expires_at)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `categories` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{
    Category, CategorySummary, CategoryWithCounts, CreateCategory, UpdateCategory,
};
use crate::repositories::support::available_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, color, icon, sort_order, is_active, \
                       created_at, updated_at";

/// Published videos and posts per category, grouped once per query.
const WITH_COUNTS: &str = "SELECT c.id, c.name, c.slug, c.description, c.color, c.icon,
        c.sort_order, c.is_active, c.created_at, c.updated_at,
        COALESCE(vc.n, 0) AS video_count,
        COALESCE(pc.n, 0) AS post_count
     FROM categories c
     LEFT JOIN (
        SELECT vcat.category_id, COUNT(*) AS n
        FROM video_categories vcat JOIN videos v ON v.id = vcat.video_id
        WHERE v.is_published
        GROUP BY vcat.category_id
     ) vc ON vc.category_id = c.id
     LEFT JOIN (
        SELECT pcat.category_id, COUNT(*) AS n
        FROM post_categories pcat JOIN blog_posts p ON p.id = pcat.post_id
        WHERE p.status = 'published'
        GROUP BY pcat.category_id
     ) pc ON pc.category_id = c.id";

const SUMMARY_COLUMNS: &str = "c.id, c.name, c.slug, c.color";

/// Provides CRUD operations for content categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category. A missing slug is derived from the name.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "categories", &input.name).await?,
        };
        let query = format!(
            "INSERT INTO categories (name, slug, description, color, icon, sort_order, is_active)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, '#0066CC'), COALESCE($5, ''),
                COALESCE($6, 0), COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a category with its content counts.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        active_only: bool,
    ) -> Result<Option<CategoryWithCounts>, sqlx::Error> {
        let query = format!("{WITH_COUNTS} WHERE c.id = $1 AND (NOT $2 OR c.is_active)");
        sqlx::query_as::<_, CategoryWithCounts>(&query)
            .bind(id)
            .bind(active_only)
            .fetch_optional(pool)
            .await
    }

    /// List categories with counts, ordered by `sort_order` then name.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CategoryWithCounts>, sqlx::Error> {
        let query = format!(
            "{WITH_COUNTS} WHERE (NOT $1 OR c.is_active)
             ORDER BY c.sort_order, c.name
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CategoryWithCounts>(&query)
            .bind(active_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, active_only: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE (NOT $1 OR is_active)")
            .bind(active_only)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                color = COALESCE($5, color),
                icon = COALESCE($6, icon),
                sort_order = COALESCE($7, sort_order),
                is_active = COALESCE($8, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Categories a video is filed under.
    pub async fn for_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM categories c
             JOIN video_categories vc ON vc.category_id = c.id
             WHERE vc.video_id = $1
             ORDER BY c.sort_order, c.name"
        );
        sqlx::query_as::<_, CategorySummary>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }

    /// Categories a blog post is filed under.
    pub async fn for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM categories c
             JOIN post_categories pc ON pc.category_id = c.id
             WHERE pc.post_id = $1
             ORDER BY c.sort_order, c.name"
        );
        sqlx::query_as::<_, CategorySummary>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Categories a subscriber follows.
    pub async fn for_subscriber(
        pool: &PgPool,
        subscriber_id: DbId,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM categories c
             JOIN subscriber_categories sc ON sc.category_id = c.id
             WHERE sc.subscriber_id = $1
             ORDER BY c.sort_order, c.name"
        );
        sqlx::query_as::<_, CategorySummary>(&query)
            .bind(subscriber_id)
            .fetch_all(pool)
            .await
    }
}

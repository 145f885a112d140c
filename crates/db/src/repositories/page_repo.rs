//! Repository for the `pages` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::{CreatePage, NavPage, Page, PageQuery, UpdatePage};
use crate::repositories::support::available_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, subtitle, content, content_html, template, meta_title, \
                       meta_description, featured_image_url, video_url, status, is_featured, \
                       show_in_nav, nav_order, show_sidebar, show_comments, full_width, \
                       background_color, background_image_url, author_id, published_at, \
                       created_at, updated_at";

/// `$1` status, `$2` template, `$3` ILIKE pattern over title and content.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR status = $1)
      AND ($2::TEXT IS NULL OR template = $2)
      AND ($3::TEXT IS NULL OR title ILIKE $3 OR content ILIKE $3)";

/// Provides CRUD operations for CMS pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a page. A missing slug is derived from the title; publishing
    /// without a date stamps `published_at`.
    pub async fn create(
        pool: &PgPool,
        author_id: Option<DbId>,
        input: &CreatePage,
    ) -> Result<Page, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "pages", &input.title).await?,
        };
        let query = format!(
            "INSERT INTO pages (title, slug, subtitle, content, content_html, template, meta_title,
                meta_description, featured_image_url, video_url, status, is_featured, show_in_nav,
                nav_order, show_sidebar, show_comments, full_width, background_color,
                background_image_url, author_id, published_at)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''),
                COALESCE($6, 'default'), COALESCE($7, ''), COALESCE($8, ''), $9,
                COALESCE($10, ''), COALESCE($11, 'draft'), COALESCE($12, false),
                COALESCE($13, false), COALESCE($14, 0), COALESCE($15, true),
                COALESCE($16, false), COALESCE($17, false), COALESCE($18, '#ffffff'), $19, $20,
                COALESCE($21, CASE WHEN $11 = 'published' THEN NOW() END))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.subtitle)
            .bind(&input.content)
            .bind(&input.content_html)
            .bind(&input.template)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(&input.featured_image_url)
            .bind(&input.video_url)
            .bind(&input.status)
            .bind(input.is_featured)
            .bind(input.show_in_nav)
            .bind(input.nav_order)
            .bind(input.show_sidebar)
            .bind(input.show_comments)
            .bind(input.full_width)
            .bind(&input.background_color)
            .bind(&input.background_image_url)
            .bind(author_id)
            .bind(input.published_at)
            .fetch_one(pool)
            .await
    }

    /// Find a page by id; `published_only` hides drafts and archived pages.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        published_only: bool,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages WHERE id = $1 AND (NOT $2 OR status = 'published')"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        filter: &PageQuery,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages {FILTER}
             ORDER BY nav_order, title, id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(status)
            .bind(&filter.template)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        status: Option<&str>,
        filter: &PageQuery,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM pages {FILTER}");
        sqlx::query_scalar(&query)
            .bind(status)
            .bind(&filter.template)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    /// Published pages shown in the site navigation, by `nav_order`.
    pub async fn navigation(pool: &PgPool) -> Result<Vec<NavPage>, sqlx::Error> {
        sqlx::query_as::<_, NavPage>(
            "SELECT id, title, slug, nav_order FROM pages
             WHERE status = 'published' AND show_in_nav
             ORDER BY nav_order, title",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                subtitle = COALESCE($4, subtitle),
                content = COALESCE($5, content),
                content_html = COALESCE($6, content_html),
                template = COALESCE($7, template),
                meta_title = COALESCE($8, meta_title),
                meta_description = COALESCE($9, meta_description),
                featured_image_url = COALESCE($10, featured_image_url),
                video_url = COALESCE($11, video_url),
                status = COALESCE($12, status),
                is_featured = COALESCE($13, is_featured),
                show_in_nav = COALESCE($14, show_in_nav),
                nav_order = COALESCE($15, nav_order),
                show_sidebar = COALESCE($16, show_sidebar),
                show_comments = COALESCE($17, show_comments),
                full_width = COALESCE($18, full_width),
                background_color = COALESCE($19, background_color),
                background_image_url = COALESCE($20, background_image_url),
                published_at = COALESCE($21, published_at,
                    CASE WHEN COALESCE($12, status) = 'published' THEN NOW() END)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.subtitle)
            .bind(&input.content)
            .bind(&input.content_html)
            .bind(&input.template)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(&input.featured_image_url)
            .bind(&input.video_url)
            .bind(&input.status)
            .bind(input.is_featured)
            .bind(input.show_in_nav)
            .bind(input.nav_order)
            .bind(input.show_sidebar)
            .bind(input.show_comments)
            .bind(input.full_width)
            .bind(&input.background_color)
            .bind(&input.background_image_url)
            .bind(input.published_at)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

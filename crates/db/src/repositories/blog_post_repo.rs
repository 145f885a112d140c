//! Repository for the `blog_posts` table and its link tables.

use bns_core::content::{read_time_minutes, POST_STATUS_PUBLISHED};
use bns_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::blog_post::{BlogPost, CreateBlogPost, PostQuery, PostSummary, UpdateBlogPost};
use crate::repositories::support::{available_slug, replace_links};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, excerpt, content, content_html, post_type, tags, \
                       featured_image_url, featured_image_caption, author_id, status, \
                       published_at, \
                       scheduled_publish_at, view_count, read_time_minutes, allow_comments, \
                       meta_title, meta_description, sponsored_by_id, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "p.id, p.title, p.slug, p.excerpt, p.post_type, \
                               p.featured_image_url, p.published_at, p.read_time_minutes";

/// Filter shared by `list` and `count`. `$1` status, `$2` post type,
/// `$3` category slug, `$4` author username, `$5` ILIKE pattern.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR status = $1)
      AND ($2::TEXT IS NULL OR post_type = $2)
      AND ($3::TEXT IS NULL OR EXISTS (
            SELECT 1 FROM post_categories pc JOIN categories c ON c.id = pc.category_id
            WHERE pc.post_id = blog_posts.id AND c.slug = $3))
      AND ($4::TEXT IS NULL OR author_id = (SELECT id FROM users WHERE username = $4))
      AND ($5::TEXT IS NULL OR title ILIKE $5 OR excerpt ILIKE $5 OR content ILIKE $5)";

/// Newest publication first; drafts without a date sort last.
const ORDER: &str = "published_at DESC NULLS LAST, created_at DESC, id DESC";

/// Link sets carried by create and update requests.
struct PostLinks<'a> {
    category_ids: Option<&'a [DbId]>,
    co_author_ids: Option<&'a [DbId]>,
    related_video_ids: Option<&'a [DbId]>,
    related_post_ids: Option<&'a [DbId]>,
}

/// Provides CRUD operations for blog posts, addressed by slug.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a post with its links in one transaction. The slug defaults to
    /// one derived from the title and the read time follows the content.
    pub async fn create(
        pool: &PgPool,
        author_id: Option<DbId>,
        input: &CreateBlogPost,
    ) -> Result<BlogPost, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "blog_posts", &input.title).await?,
        };
        let read_time = read_time_minutes(input.content.as_deref().unwrap_or_default());
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO blog_posts (title, slug, excerpt, content, content_html, post_type, tags,
                featured_image_url, featured_image_caption, author_id, status, published_at,
                scheduled_publish_at, read_time_minutes, allow_comments, meta_title,
                meta_description, sponsored_by_id)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''), $6,
                COALESCE($7, '[]'::jsonb), $8, COALESCE($9, ''), $10, COALESCE($11, 'draft'),
                COALESCE($12, CASE WHEN $11 = 'published' THEN NOW() END),
                $13, $14, COALESCE($15, true), COALESCE($16, ''), COALESCE($17, ''), $18)
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.content_html)
            .bind(&input.post_type)
            .bind(&input.tags)
            .bind(&input.featured_image_url)
            .bind(&input.featured_image_caption)
            .bind(author_id)
            .bind(&input.status)
            .bind(input.published_at)
            .bind(input.scheduled_publish_at)
            .bind(read_time)
            .bind(input.allow_comments)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(input.sponsored_by_id)
            .fetch_one(&mut *tx)
            .await?;
        let links = PostLinks {
            category_ids: Some(&input.category_ids),
            co_author_ids: Some(&input.co_author_ids),
            related_video_ids: Some(&input.related_video_ids),
            related_post_ids: Some(&input.related_post_ids),
        };
        Self::write_links(&mut *tx, post.id, &links).await?;
        tx.commit().await?;
        Ok(post)
    }

    /// Find a post by slug; `published_only` hides unpublished posts.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE slug = $1 AND (NOT $2 OR status = 'published')"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        filter: &PostQuery,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts {FILTER}
             ORDER BY {ORDER}
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(status)
            .bind(&filter.post_type)
            .bind(&filter.category)
            .bind(&filter.author)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        status: Option<&str>,
        filter: &PostQuery,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM blog_posts {FILTER}");
        sqlx::query_scalar(&query)
            .bind(status)
            .bind(&filter.post_type)
            .bind(&filter.category)
            .bind(&filter.author)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    /// Bump the view counter, returning the new value.
    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE blog_posts SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// The most recently published post.
    pub async fn latest_published(pool: &PgPool) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE status = '{POST_STATUS_PUBLISHED}'
             ORDER BY {ORDER}
             LIMIT 1"
        );
        sqlx::query_as::<_, BlogPost>(&query).fetch_optional(pool).await
    }

    /// Published posts that `post_id` lists as related.
    pub async fn related(
        pool: &PgPool,
        post_id: DbId,
        limit: i64,
    ) -> Result<Vec<PostSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blog_posts p
             JOIN post_related_posts r ON r.related_post_id = p.id
             WHERE r.post_id = $1 AND p.status = '{POST_STATUS_PUBLISHED}'
             ORDER BY p.published_at DESC NULLS LAST, p.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, PostSummary>(&query)
            .bind(post_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Link sets are replaced only when supplied and the read
    /// time is recomputed when the content changes.
    pub async fn update(
        pool: &PgPool,
        slug: &str,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let read_time = input.content.as_deref().map(read_time_minutes);
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                content_html = COALESCE($6, content_html),
                post_type = COALESCE($7, post_type),
                tags = COALESCE($8, tags),
                featured_image_url = COALESCE($9, featured_image_url),
                featured_image_caption = COALESCE($10, featured_image_caption),
                status = COALESCE($11, status),
                published_at = COALESCE($12, published_at,
                    CASE WHEN COALESCE($11, status) = 'published' THEN NOW() END),
                scheduled_publish_at = COALESCE($13, scheduled_publish_at),
                read_time_minutes = COALESCE($14, read_time_minutes),
                allow_comments = COALESCE($15, allow_comments),
                meta_title = COALESCE($16, meta_title),
                meta_description = COALESCE($17, meta_description),
                sponsored_by_id = COALESCE($18, sponsored_by_id)
             WHERE slug = $1
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.content_html)
            .bind(&input.post_type)
            .bind(&input.tags)
            .bind(&input.featured_image_url)
            .bind(&input.featured_image_caption)
            .bind(&input.status)
            .bind(input.published_at)
            .bind(input.scheduled_publish_at)
            .bind(read_time)
            .bind(input.allow_comments)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(input.sponsored_by_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(post) = post else {
            return Ok(None);
        };
        let links = PostLinks {
            category_ids: input.category_ids.as_deref(),
            co_author_ids: input.co_author_ids.as_deref(),
            related_video_ids: input.related_video_ids.as_deref(),
            related_post_ids: input.related_post_ids.as_deref(),
        };
        Self::write_links(&mut *tx, post.id, &links).await?;
        tx.commit().await?;
        Ok(Some(post))
    }

    pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn write_links(
        conn: &mut PgConnection,
        post_id: DbId,
        links: &PostLinks<'_>,
    ) -> Result<(), sqlx::Error> {
        if let Some(ids) = links.category_ids {
            replace_links(conn, "post_categories", "post_id", "category_id", post_id, ids).await?;
        }
        if let Some(ids) = links.co_author_ids {
            replace_links(conn, "post_co_authors", "post_id", "user_id", post_id, ids).await?;
        }
        if let Some(ids) = links.related_video_ids {
            replace_links(conn, "post_related_videos", "post_id", "video_id", post_id, ids)
                .await?;
        }
        if let Some(ids) = links.related_post_ids {
            // A post never lists itself.
            let ids: Vec<DbId> = ids.iter().copied().filter(|id| *id != post_id).collect();
            replace_links(
                conn,
                "post_related_posts",
                "post_id",
                "related_post_id",
                post_id,
                &ids,
            )
            .await?;
        }
        Ok(())
    }
}

//! Repository for the `videos` table and its category links.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video, VideoQuery, VideoSummary};
use crate::repositories::support::{available_slug, replace_links};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, platform, external_id, external_url, \
                       embed_url, thumbnail_url, content_type, duration_seconds, view_count, \
                       like_count, share_count, comment_count, last_metrics_update, is_featured, \
                       is_published, published_at, display_order, author_id, playlist_id, \
                       sponsored_by_id, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "v.id, v.title, v.slug, v.platform, v.thumbnail_url";

/// Filter shared by `list` and `count`.
///
/// `$1` true restricts to published videos whose publish time has passed.
/// `$2` platform, `$3` content type, `$4` category slug, `$5` featured flag,
/// `$6` playlist slug, `$7` ILIKE pattern over title and description.
const FILTER: &str = "WHERE (NOT $1 OR (is_published
                                 AND (published_at IS NULL OR published_at <= NOW())))
      AND ($2::TEXT IS NULL OR platform = $2)
      AND ($3::TEXT IS NULL OR content_type = $3)
      AND ($4::TEXT IS NULL OR EXISTS (
            SELECT 1 FROM video_categories vc JOIN categories c ON c.id = vc.category_id
            WHERE vc.video_id = videos.id AND c.slug = $4))
      AND ($5::BOOLEAN IS NULL OR is_featured = $5)
      AND ($6::TEXT IS NULL OR playlist_id = (SELECT id FROM playlists WHERE slug = $6))
      AND ($7::TEXT IS NULL OR title ILIKE $7 OR description ILIKE $7)";

/// Columns accepted by `?ordering=`.
pub const ORDERING_FIELDS: &[&str] = &["published_at", "view_count", "created_at"];

/// Default list order: newest publication first.
pub const DEFAULT_ORDER: &str = "published_at DESC NULLS LAST, id DESC";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a video and its category links in one transaction.
    pub async fn create(
        pool: &PgPool,
        author_id: Option<DbId>,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "videos", &input.title).await?,
        };
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO videos (title, slug, description, platform, external_id, external_url,
                embed_url, thumbnail_url, content_type, duration_seconds, is_featured, is_published,
                published_at, display_order, author_id, playlist_id, sponsored_by_id)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5, $6, COALESCE($7, ''), COALESCE($8, ''),
                $9, $10, COALESCE($11, false), COALESCE($12, true), $13, COALESCE($14, 0),
                $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.description)
            .bind(&input.platform)
            .bind(&input.external_id)
            .bind(&input.external_url)
            .bind(&input.embed_url)
            .bind(&input.thumbnail_url)
            .bind(&input.content_type)
            .bind(input.duration_seconds)
            .bind(input.is_featured)
            .bind(input.is_published)
            .bind(input.published_at)
            .bind(input.display_order)
            .bind(author_id)
            .bind(input.playlist_id)
            .bind(input.sponsored_by_id)
            .fetch_one(&mut *tx)
            .await?;
        replace_links(
            &mut *tx,
            "video_categories",
            "video_id",
            "category_id",
            video.id,
            &input.category_ids,
        )
        .await?;
        tx.commit().await?;
        Ok(video)
    }

    /// Find a video by id; `public_only` hides unpublished and future videos.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        public_only: bool,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE id = $1
               AND (NOT $2 OR (is_published AND (published_at IS NULL OR published_at <= NOW())))"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(public_only)
            .fetch_optional(pool)
            .await
    }

    /// List videos matching `filter`. `order_by` must come from
    /// `bns_core::search::order_clause` over [`ORDERING_FIELDS`].
    pub async fn list(
        pool: &PgPool,
        public_only: bool,
        filter: &VideoQuery,
        search: Option<&str>,
        order_by: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos {FILTER}
             ORDER BY {order_by}
             LIMIT $8 OFFSET $9"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(public_only)
            .bind(&filter.platform)
            .bind(&filter.content_type)
            .bind(&filter.category)
            .bind(filter.is_featured)
            .bind(&filter.playlist)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        public_only: bool,
        filter: &VideoQuery,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM videos {FILTER}");
        sqlx::query_scalar(&query)
            .bind(public_only)
            .bind(&filter.platform)
            .bind(&filter.content_type)
            .bind(&filter.category)
            .bind(filter.is_featured)
            .bind(&filter.playlist)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    /// Published videos of a playlist in display order.
    pub async fn for_playlist(
        pool: &PgPool,
        playlist_id: DbId,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE playlist_id = $1 AND is_published
             ORDER BY display_order, published_at DESC NULLS LAST, id"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(playlist_id)
            .fetch_all(pool)
            .await
    }

    /// Videos a blog post links to.
    pub async fn related_to_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<VideoSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM videos v
             JOIN post_related_videos prv ON prv.video_id = v.id
             WHERE prv.post_id = $1
             ORDER BY v.published_at DESC NULLS LAST, v.id"
        );
        sqlx::query_as::<_, VideoSummary>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VideoSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM videos v WHERE v.id = $1");
        sqlx::query_as::<_, VideoSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a video. Categories are replaced only when supplied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                platform = COALESCE($5, platform),
                external_id = COALESCE($6, external_id),
                external_url = COALESCE($7, external_url),
                embed_url = COALESCE($8, embed_url),
                thumbnail_url = COALESCE($9, thumbnail_url),
                content_type = COALESCE($10, content_type),
                duration_seconds = COALESCE($11, duration_seconds),
                view_count = COALESCE($12, view_count),
                like_count = COALESCE($13, like_count),
                share_count = COALESCE($14, share_count),
                comment_count = COALESCE($15, comment_count),
                last_metrics_update = CASE
                    WHEN COALESCE($12, $13, $14, $15) IS NOT NULL THEN NOW()
                    ELSE last_metrics_update END,
                is_featured = COALESCE($16, is_featured),
                is_published = COALESCE($17, is_published),
                published_at = COALESCE($18, published_at),
                display_order = COALESCE($19, display_order),
                playlist_id = COALESCE($20, playlist_id),
                sponsored_by_id = COALESCE($21, sponsored_by_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.platform)
            .bind(&input.external_id)
            .bind(&input.external_url)
            .bind(&input.embed_url)
            .bind(&input.thumbnail_url)
            .bind(&input.content_type)
            .bind(input.duration_seconds)
            .bind(input.view_count)
            .bind(input.like_count)
            .bind(input.share_count)
            .bind(input.comment_count)
            .bind(input.is_featured)
            .bind(input.is_published)
            .bind(input.published_at)
            .bind(input.display_order)
            .bind(input.playlist_id)
            .bind(input.sponsored_by_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(video) = video else {
            return Ok(None);
        };
        if let Some(ids) = &input.category_ids {
            replace_links(&mut *tx, "video_categories", "video_id", "category_id", video.id, ids)
                .await?;
        }
        tx.commit().await?;
        Ok(Some(video))
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

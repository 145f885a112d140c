//! Repository for the `media_items` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::media_item::{CreateMediaItem, MediaItem, MediaQuery, UpdateMediaItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, file_path, filename, media_type, title, alt_text, caption, file_size, \
                       width, height, folder, tags, uploaded_by_id, created_at";

/// `$1` folder, `$2` media type, `$3` ILIKE pattern over title and filename.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR folder = $1)
      AND ($2::TEXT IS NULL OR media_type = $2)
      AND ($3::TEXT IS NULL OR title ILIKE $3 OR filename ILIKE $3)";

/// Provides CRUD operations for the media library.
pub struct MediaRepo;

impl MediaRepo {
    pub async fn create(pool: &PgPool, input: &CreateMediaItem) -> Result<MediaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_items (file_path, filename, media_type, title, alt_text, caption,
                file_size, width, height, folder, tags, uploaded_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(&input.file_path)
            .bind(&input.filename)
            .bind(&input.media_type)
            .bind(&input.title)
            .bind(&input.alt_text)
            .bind(&input.caption)
            .bind(input.file_size)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.folder)
            .bind(&input.tags)
            .bind(input.uploaded_by_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_items WHERE id = $1");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List media, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &MediaQuery,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_items {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(&filter.folder)
            .bind(&filter.media_type)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        filter: &MediaQuery,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM media_items {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.folder)
            .bind(&filter.media_type)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaItem,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!(
            "UPDATE media_items SET
                title = COALESCE($2, title),
                alt_text = COALESCE($3, alt_text),
                caption = COALESCE($4, caption),
                folder = COALESCE($5, folder),
                tags = COALESCE($6, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.alt_text)
            .bind(&input.caption)
            .bind(&input.folder)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete the row, returning it so the caller can remove the stored file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("DELETE FROM media_items WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

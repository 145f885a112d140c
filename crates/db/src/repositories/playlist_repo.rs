//! Repository for the `playlists` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::playlist::{
    CreatePlaylist, Playlist, PlaylistQuery, PlaylistSummary, UpdatePlaylist,
};
use crate::repositories::support::available_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, thumbnail_url, is_featured, \
                       difficulty_level, estimated_duration_minutes, created_at, updated_at";

const FILTER: &str = "WHERE ($1::BOOLEAN IS NULL OR is_featured = $1)
      AND ($2::TEXT IS NULL OR difficulty_level = $2)";

/// Provides CRUD operations for playlists, addressed by slug.
pub struct PlaylistRepo;

impl PlaylistRepo {
    /// Insert a playlist. A missing slug is derived from the title.
    pub async fn create(pool: &PgPool, input: &CreatePlaylist) -> Result<Playlist, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "playlists", &input.title).await?,
        };
        let query = format!(
            "INSERT INTO playlists (title, slug, description, thumbnail_url, is_featured,
                difficulty_level, estimated_duration_minutes)
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, false),
                COALESCE($6, 'beginner'), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(input.is_featured)
            .bind(&input.difficulty_level)
            .bind(input.estimated_duration_minutes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM playlists WHERE slug = $1");
        sqlx::query_as::<_, Playlist>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Compact reference for embedding in a video.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PlaylistSummary>, sqlx::Error> {
        sqlx::query_as::<_, PlaylistSummary>("SELECT id, title, slug FROM playlists WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List playlists, featured first then newest.
    pub async fn list(
        pool: &PgPool,
        filter: &PlaylistQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Playlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM playlists {FILTER}
             ORDER BY is_featured DESC, created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(filter.is_featured)
            .bind(&filter.difficulty_level)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &PlaylistQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM playlists {FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.is_featured)
            .bind(&filter.difficulty_level)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        slug: &str,
        input: &UpdatePlaylist,
    ) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!(
            "UPDATE playlists SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                thumbnail_url = COALESCE($5, thumbnail_url),
                is_featured = COALESCE($6, is_featured),
                difficulty_level = COALESCE($7, difficulty_level),
                estimated_duration_minutes = COALESCE($8, estimated_duration_minutes)
             WHERE slug = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(slug)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(input.is_featured)
            .bind(&input.difficulty_level)
            .bind(input.estimated_duration_minutes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playlists WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

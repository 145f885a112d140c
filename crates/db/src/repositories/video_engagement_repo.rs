//! Repository for the `video_engagements` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::video_engagement::{
    EngagementQuery, EventCount, RecordEngagement, VideoEngagement,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, video_id, user_id, session_id, event_type, timestamp_seconds, metadata, \
                       created_at";

/// `$1` video id, `$2` event type.
const FILTER: &str = "WHERE ($1::BIGINT IS NULL OR video_id = $1)
      AND ($2::TEXT IS NULL OR event_type = $2)";

/// Provides recording and reporting over video engagement events.
pub struct VideoEngagementRepo;

impl VideoEngagementRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Option<DbId>,
        input: &RecordEngagement,
    ) -> Result<VideoEngagement, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_engagements (video_id, user_id, session_id, event_type,
                timestamp_seconds, metadata)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoEngagement>(&query)
            .bind(input.video_id)
            .bind(user_id)
            .bind(&input.session_id)
            .bind(&input.event_type)
            .bind(input.timestamp_seconds)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &EngagementQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VideoEngagement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_engagements {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, VideoEngagement>(&query)
            .bind(filter.video)
            .bind(&filter.event_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &EngagementQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM video_engagements {FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.video)
            .bind(&filter.event_type)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM video_engagements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Events per type for one video, most frequent first.
    pub async fn counts_for_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<EventCount>, sqlx::Error> {
        sqlx::query_as::<_, EventCount>(
            "SELECT event_type, COUNT(*) AS count FROM video_engagements
             WHERE video_id = $1
             GROUP BY event_type
             ORDER BY count DESC, event_type",
        )
        .bind(video_id)
        .fetch_all(pool)
        .await
    }
}

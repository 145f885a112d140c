//! Repository for the `donor_funnel_events` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::funnel_event::{CreateFunnelEvent, FunnelEvent, FunnelQuery, StageSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, donor_id, stage, source, value, created_at";

/// `$1` donor profile id, `$2` stage.
const FILTER: &str = "WHERE ($1::BIGINT IS NULL OR donor_id = $1)
      AND ($2::TEXT IS NULL OR stage = $2)";

/// Provides recording and reporting over donor funnel events.
pub struct FunnelRepo;

impl FunnelRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateFunnelEvent,
    ) -> Result<FunnelEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO donor_funnel_events (donor_id, stage, source, value)
             VALUES ($1, $2, COALESCE($3, ''), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FunnelEvent>(&query)
            .bind(input.donor_id)
            .bind(&input.stage)
            .bind(&input.source)
            .bind(input.value)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &FunnelQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FunnelEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donor_funnel_events {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, FunnelEvent>(&query)
            .bind(filter.donor)
            .bind(&filter.stage)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &FunnelQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM donor_funnel_events {FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.donor)
            .bind(&filter.stage)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donor_funnel_events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Event count and summed value per stage. Stages without events are
    /// absent; callers order by journey position.
    pub async fn summary(pool: &PgPool) -> Result<Vec<StageSummary>, sqlx::Error> {
        sqlx::query_as::<_, StageSummary>(
            "SELECT stage, COUNT(*) AS count, COALESCE(SUM(value), 0) AS total_value
             FROM donor_funnel_events
             GROUP BY stage",
        )
        .fetch_all(pool)
        .await
    }
}

//! Repository for the `sponsorship_deliverables` table and its content links.

use bns_core::sponsors::DELIVERABLE_COMPLETED;
use bns_core::types::{Date, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::deliverable::{
    CreateDeliverable, Deliverable, DeliverableLinks, DeliverableQuery, DeliverableStatusCounts,
    UpdateDeliverable,
};
use crate::repositories::support::{linked_ids, replace_links};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sponsor_id, deliverable_type, description, quantity_required, \
                       quantity_delivered, status, due_date, completed_date, notes, \
                       internal_notes, \
                       created_at, updated_at";

/// `$1` status, `$2` sponsor id, `$3` overdue flag evaluated against `$4` (today).
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR status = $1)
      AND ($2::BIGINT IS NULL OR sponsor_id = $2)
      AND ($3::BOOLEAN IS NULL OR $3 = (status <> 'completed' AND due_date < $4::DATE))";

/// Junction tables holding a deliverable's linked content.
const POSTS: (&str, &str) = ("deliverable_posts", "post_id");
const VIDEOS: (&str, &str) = ("deliverable_videos", "video_id");
const CAMPAIGNS: (&str, &str) = ("deliverable_campaigns", "campaign_id");

/// Provides CRUD and progress tracking for sponsorship deliverables.
pub struct DeliverableRepo;

impl DeliverableRepo {
    /// Insert a deliverable with its linked content.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDeliverable,
    ) -> Result<Deliverable, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO sponsorship_deliverables (sponsor_id, deliverable_type, description,
                quantity_required, due_date, notes, internal_notes)
             VALUES ($1, $2, $3, COALESCE($4, 1), $5, COALESCE($6, ''), COALESCE($7, ''))
             RETURNING {COLUMNS}"
        );
        let deliverable = sqlx::query_as::<_, Deliverable>(&query)
            .bind(input.sponsor_id)
            .bind(&input.deliverable_type)
            .bind(&input.description)
            .bind(input.quantity_required)
            .bind(input.due_date)
            .bind(&input.notes)
            .bind(&input.internal_notes)
            .fetch_one(&mut *tx)
            .await?;
        for ((table, column), ids) in [
            (POSTS, &input.linked_post_ids),
            (VIDEOS, &input.linked_video_ids),
            (CAMPAIGNS, &input.linked_campaign_ids),
        ] {
            replace_links(&mut *tx, table, "deliverable_id", column, deliverable.id, ids).await?;
        }
        tx.commit().await?;
        Ok(deliverable)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sponsorship_deliverables WHERE id = $1");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List deliverables, soonest due first.
    pub async fn list(
        pool: &PgPool,
        filter: &DeliverableQuery,
        today: Date,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Deliverable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sponsorship_deliverables {FILTER}
             ORDER BY due_date, id
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(&filter.status)
            .bind(filter.sponsor)
            .bind(filter.overdue)
            .bind(today)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        filter: &DeliverableQuery,
        today: Date,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM sponsorship_deliverables {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.status)
            .bind(filter.sponsor)
            .bind(filter.overdue)
            .bind(today)
            .fetch_one(pool)
            .await
    }

    /// Update a deliverable. Link sets are replaced only when supplied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDeliverable,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE sponsorship_deliverables SET
                deliverable_type = COALESCE($2, deliverable_type),
                description = COALESCE($3, description),
                quantity_required = COALESCE($4, quantity_required),
                quantity_delivered = COALESCE($5, quantity_delivered),
                status = COALESCE($6, status),
                due_date = COALESCE($7, due_date),
                notes = COALESCE($8, notes),
                internal_notes = COALESCE($9, internal_notes),
                completed_date = CASE
                    WHEN COALESCE($6, status) = '{DELIVERABLE_COMPLETED}'
                        THEN COALESCE(completed_date, CURRENT_DATE)
                    ELSE NULL END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let deliverable = sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .bind(&input.deliverable_type)
            .bind(&input.description)
            .bind(input.quantity_required)
            .bind(input.quantity_delivered)
            .bind(&input.status)
            .bind(input.due_date)
            .bind(&input.notes)
            .bind(&input.internal_notes)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(deliverable) = deliverable else {
            return Ok(None);
        };
        for ((table, column), ids) in [
            (POSTS, &input.linked_post_ids),
            (VIDEOS, &input.linked_video_ids),
            (CAMPAIGNS, &input.linked_campaign_ids),
        ] {
            if let Some(ids) = ids {
                replace_links(&mut *tx, table, "deliverable_id", column, id, ids).await?;
            }
        }
        tx.commit().await?;
        Ok(Some(deliverable))
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sponsorship_deliverables WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn links(pool: &PgPool, id: DbId) -> Result<DeliverableLinks, sqlx::Error> {
        Ok(DeliverableLinks {
            linked_post_ids: linked_ids(pool, POSTS.0, "deliverable_id", POSTS.1, id).await?,
            linked_video_ids: linked_ids(pool, VIDEOS.0, "deliverable_id", VIDEOS.1, id).await?,
            linked_campaign_ids: linked_ids(pool, CAMPAIGNS.0, "deliverable_id", CAMPAIGNS.1, id)
                .await?,
        })
    }

    /// Counts per status across all sponsors. `overdue` is derived from due
    /// dates relative to `today` rather than the stored status.
    pub async fn status_counts(
        pool: &PgPool,
        today: Date,
    ) -> Result<DeliverableStatusCounts, sqlx::Error> {
        sqlx::query_as::<_, DeliverableStatusCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status <> 'completed' AND due_date < $1) AS overdue
             FROM sponsorship_deliverables",
        )
        .bind(today)
        .fetch_one(pool)
        .await
    }

    /// Read a deliverable, locking it for the rest of the transaction.
    pub async fn lock(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sponsorship_deliverables WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Store delivered quantity and the status it implies.
    pub async fn save_progress(
        conn: &mut PgConnection,
        id: DbId,
        delivered: i32,
        status: &str,
        today: Date,
    ) -> Result<Deliverable, sqlx::Error> {
        let query = format!(
            "UPDATE sponsorship_deliverables SET
                quantity_delivered = $2,
                status = $3,
                completed_date = CASE WHEN $3 = '{DELIVERABLE_COMPLETED}' THEN $4
                                      ELSE completed_date END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .bind(delivered)
            .bind(status)
            .bind(today)
            .fetch_one(&mut *conn)
            .await
    }
}

//! Repository for the `email_logs` table and the engagement counters it
//! feeds on subscribers and campaigns.

use bns_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::email_log::{EmailLog, EmailLogQuery, RecordSend};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, subscriber_id, message_id, sent_at, delivered_at, \
                       opened_at, \
                       clicked_at, bounced_at, complained_at, clicked_links, created_at";

/// `$1` campaign id, `$2` subscriber id.
const FILTER: &str = "WHERE ($1::BIGINT IS NULL OR campaign_id = $1)
      AND ($2::BIGINT IS NULL OR subscriber_id = $2)";

/// Provides read access and tracking updates for email logs.
pub struct EmailLogRepo;

impl EmailLogRepo {
    /// Log a sent email and bump the subscriber's and campaign's counters.
    pub async fn record_send(pool: &PgPool, input: &RecordSend) -> Result<EmailLog, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO email_logs (campaign_id, subscriber_id, message_id, sent_at)
             VALUES ($1, $2, COALESCE($3, ''), NOW())
             RETURNING {COLUMNS}"
        );
        let log = sqlx::query_as::<_, EmailLog>(&query)
            .bind(input.campaign_id)
            .bind(input.subscriber_id)
            .bind(&input.message_id)
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query("UPDATE subscribers SET emails_sent = emails_sent + 1 WHERE id = $1")
            .bind(log.subscriber_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "UPDATE newsletter_campaigns SET total_recipients = total_recipients + 1 WHERE id = $1",
        )
        .bind(log.campaign_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(log)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EmailLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM email_logs WHERE id = $1");
        sqlx::query_as::<_, EmailLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &EmailLogQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EmailLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM email_logs {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, EmailLog>(&query)
            .bind(filter.campaign)
            .bind(filter.subscriber)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &EmailLogQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM email_logs {FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.campaign)
            .bind(filter.subscriber)
            .fetch_one(pool)
            .await
    }

    /// Record an open. Only the first open stamps the log and counts toward
    /// the subscriber and campaign totals.
    pub async fn track_open(pool: &PgPool, id: DbId) -> Result<Option<EmailLog>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let Some(log) = Self::lock(&mut *tx, id).await? else {
            return Ok(None);
        };
        if log.opened_at.is_some() {
            return Ok(Some(log));
        }
        let query = format!(
            "UPDATE email_logs SET opened_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let log = sqlx::query_as::<_, EmailLog>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query(
            "UPDATE subscribers SET emails_opened = emails_opened + 1, last_opened_at = NOW()
             WHERE id = $1",
        )
        .bind(log.subscriber_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("UPDATE newsletter_campaigns SET open_count = open_count + 1 WHERE id = $1")
            .bind(log.campaign_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(log))
    }

    /// Record a click on `url`. Every click appends the link; the first one
    /// also stamps the log and bumps the counters.
    pub async fn track_click(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<Option<EmailLog>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let Some(existing) = Self::lock(&mut *tx, id).await? else {
            return Ok(None);
        };
        let first_click = existing.clicked_at.is_none();
        let query = format!(
            "UPDATE email_logs SET
                clicked_links = clicked_links || jsonb_build_array($2::TEXT),
                clicked_at = COALESCE(clicked_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let log = sqlx::query_as::<_, EmailLog>(&query)
            .bind(id)
            .bind(url)
            .fetch_one(&mut *tx)
            .await?;
        if first_click {
            sqlx::query(
                "UPDATE subscribers SET emails_clicked = emails_clicked + 1, last_clicked_at = NOW()
                 WHERE id = $1",
            )
            .bind(log.subscriber_id)
            .execute(&mut *tx)
            .await?;
            sqlx::query(
                "UPDATE newsletter_campaigns SET click_count = click_count + 1 WHERE id = $1",
            )
            .bind(log.campaign_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(Some(log))
    }

    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<EmailLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM email_logs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, EmailLog>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}

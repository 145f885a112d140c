//! Repository for the `subscribers` table.

use bns_core::newsletter::{SUBSCRIBER_PENDING, SUBSCRIBER_UNSUBSCRIBED};
use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscriber::{CreateSubscriber, Subscriber, SubscriberQuery, UpdateSubscriber};
use crate::repositories::support::replace_links;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, first_name, last_name, content_preference, status, \
                       subscribed_at, \
                       unsubscribed_at, unsubscribe_reason, source, ip_address, user_agent, \
                       emails_sent, emails_opened, emails_clicked, last_opened_at, \
                       last_clicked_at, \
                       confirmation_token, confirmed_at, created_at, updated_at";

/// `$1` status, `$2` content preference, `$3` ILIKE pattern over email and names.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR status = $1)
      AND ($2::TEXT IS NULL OR content_preference = $2)
      AND ($3::TEXT IS NULL OR email ILIKE $3 OR first_name ILIKE $3 OR last_name ILIKE $3)";

/// Provides CRUD and opt-in state changes for subscribers.
pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Insert a pending subscriber and the categories they follow.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscriber,
        category_ids: &[DbId],
    ) -> Result<Subscriber, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO subscribers (email, first_name, last_name, content_preference, status,
                source, ip_address, user_agent, confirmation_token)
             VALUES ($1, $2, $3, $4, '{SUBSCRIBER_PENDING}', $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let subscriber = sqlx::query_as::<_, Subscriber>(&query)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.content_preference)
            .bind(&input.source)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(&input.confirmation_token)
            .fetch_one(&mut *tx)
            .await?;
        replace_links(
            &mut *tx,
            "subscriber_categories",
            "subscriber_id",
            "category_id",
            subscriber.id,
            category_ids,
        )
        .await?;
        tx.commit().await?;
        Ok(subscriber)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers WHERE id = $1");
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subscriber by (already normalised) email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers WHERE email = $1");
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers WHERE confirmation_token = $1");
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Reset a lapsed subscriber to pending with a fresh token.
    pub async fn resubscribe(
        pool: &PgPool,
        id: DbId,
        token: &str,
    ) -> Result<Subscriber, sqlx::Error> {
        let query = format!(
            "UPDATE subscribers SET
                status = '{SUBSCRIBER_PENDING}',
                confirmation_token = $2,
                unsubscribed_at = NULL,
                unsubscribe_reason = ''
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(id)
            .bind(token)
            .fetch_one(pool)
            .await
    }

    /// Activate a pending subscriber and consume its token.
    pub async fn confirm(pool: &PgPool, id: DbId) -> Result<Subscriber, sqlx::Error> {
        let query = format!(
            "UPDATE subscribers SET
                status = 'active',
                confirmed_at = NOW(),
                subscribed_at = NOW(),
                confirmation_token = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn unsubscribe(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Subscriber, sqlx::Error> {
        let query = format!(
            "UPDATE subscribers SET
                status = 'unsubscribed',
                unsubscribed_at = NOW(),
                unsubscribe_reason = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(id)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &SubscriberQuery,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Subscriber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscribers {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(&filter.status)
            .bind(&filter.content_preference)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        filter: &SubscriberQuery,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM subscribers {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.status)
            .bind(&filter.content_preference)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    /// Staff patch. Categories are replaced only when supplied. Moving to
    /// `unsubscribed` stamps `unsubscribed_at` like the public flow does.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE subscribers SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                content_preference = COALESCE($4, content_preference),
                status = COALESCE($5, status),
                unsubscribed_at = CASE
                    WHEN $5 = '{SUBSCRIBER_UNSUBSCRIBED}' AND status <> $5 THEN NOW()
                    ELSE unsubscribed_at
                END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let subscriber = sqlx::query_as::<_, Subscriber>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.content_preference)
            .bind(&input.status)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(subscriber) = subscriber else {
            return Ok(None);
        };
        if let Some(ids) = &input.category_ids {
            replace_links(
                &mut *tx,
                "subscriber_categories",
                "subscriber_id",
                "category_id",
                subscriber.id,
                ids,
            )
            .await?;
        }
        tx.commit().await?;
        Ok(Some(subscriber))
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

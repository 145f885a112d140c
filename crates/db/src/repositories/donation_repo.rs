//! Repository for the `donations` table.

use bns_core::sponsors::{DEFAULT_CURRENCY, DONATION_COMPLETED};
use bns_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::donation::{
    CreateDonation, Donation, DonationQuery, DonationStatistics, UpdateDonation,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, donor_id, amount, currency, payment_method, status, transaction_id, \
                       payment_provider, payment_metadata, is_recurring, recurring_frequency, \
                       parent_donation_id, receipt_number, receipt_sent, campaign_source, \
                       landing_page, created_at, completed_at";

/// `$1` status, `$2` donor profile id, `$3` payment method.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR status = $1)
      AND ($2::BIGINT IS NULL OR donor_id = $2)
      AND ($3::TEXT IS NULL OR payment_method = $3)";

/// Provides CRUD and status transitions for donations.
pub struct DonationRepo;

impl DonationRepo {
    /// Insert a pending donation.
    pub async fn create(pool: &PgPool, input: &CreateDonation) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations (donor_id, amount, currency, payment_method, transaction_id,
                payment_provider, payment_metadata, is_recurring, recurring_frequency,
                parent_donation_id, campaign_source, landing_page)
             VALUES ($1, $2, COALESCE($3, '{DEFAULT_CURRENCY}'), $4, COALESCE($5, ''),
                COALESCE($6, ''), COALESCE($7, '{{}}'::jsonb), $8, $9, $10,
                COALESCE($11, ''), COALESCE($12, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(input.donor_id)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.payment_method)
            .bind(&input.transaction_id)
            .bind(&input.payment_provider)
            .bind(&input.payment_metadata)
            .bind(input.is_recurring)
            .bind(&input.recurring_frequency)
            .bind(input.parent_donation_id)
            .bind(&input.campaign_source)
            .bind(&input.landing_page)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List donations, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &DonationQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(&filter.status)
            .bind(filter.donor)
            .bind(&filter.payment_method)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &DonationQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM donations {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.status)
            .bind(filter.donor)
            .bind(&filter.payment_method)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDonation,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!(
            "UPDATE donations SET
                transaction_id = COALESCE($2, transaction_id),
                payment_provider = COALESCE($3, payment_provider),
                payment_metadata = COALESCE($4, payment_metadata),
                receipt_sent = COALESCE($5, receipt_sent),
                campaign_source = COALESCE($6, campaign_source),
                landing_page = COALESCE($7, landing_page)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .bind(&input.transaction_id)
            .bind(&input.payment_provider)
            .bind(&input.payment_metadata)
            .bind(input.receipt_sent)
            .bind(&input.campaign_source)
            .bind(&input.landing_page)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total amount and number of completed donations.
    pub async fn statistics(pool: &PgPool) -> Result<DonationStatistics, sqlx::Error> {
        sqlx::query_as::<_, DonationStatistics>(&format!(
            "SELECT COALESCE(SUM(amount), 0) AS total_raised, COUNT(*) AS donation_count
             FROM donations WHERE status = '{DONATION_COMPLETED}'"
        ))
        .fetch_one(pool)
        .await
    }

    /// Read a donation, locking it for the rest of the transaction.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Move a donation to `status`. Completion stamps `completed_at` and
    /// stores the receipt number.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
        receipt_number: Option<&str>,
    ) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "UPDATE donations SET
                status = $2,
                completed_at = CASE WHEN $2 = '{DONATION_COMPLETED}' THEN NOW()
                                    ELSE completed_at END,
                receipt_number = COALESCE($3, receipt_number)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .bind(status)
            .bind(receipt_number)
            .fetch_one(&mut *conn)
            .await
    }
}

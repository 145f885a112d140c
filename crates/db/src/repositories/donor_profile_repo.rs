//! Repository for the `donor_profiles` table.

use bns_core::sponsors::DonorTotals;
use bns_core::types::{Date, DbId, Money};
use sqlx::{PgConnection, PgPool};

use crate::models::donor_profile::{
    CreateDonorProfile, DonorProfile, DonorQuery, UpdateDonorProfile,
};

/// Profile columns plus the owning user's email and display name, selected
/// from `d` joined with `u`.
const SELECT: &str = "SELECT d.id, d.user_id, u.email AS user_email,
                             COALESCE(NULLIF(TRIM(u.first_name || ' ' || u.last_name), ''),
                                      u.username) AS user_name,
                             d.donor_type, d.tax_id, d.billing_address, d.total_donated,
                             d.donation_count,
                             d.first_donation_date, d.last_donation_date, d.is_recurring_donor,
                             d.preferred_payment_method, d.communication_preferences, d.notes,
                             d.created_at, d.updated_at";

/// `$1` donor type, `$2` recurring flag.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR d.donor_type = $1)
                        AND ($2::BOOLEAN IS NULL OR d.is_recurring_donor = $2)";

/// Provides CRUD operations and donation bookkeeping for donor profiles.
pub struct DonorProfileRepo;

impl DonorProfileRepo {
    /// Insert a new profile, returning it joined with its user.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDonorProfile,
    ) -> Result<DonorProfile, sqlx::Error> {
        let query = format!(
            "WITH d AS (
                INSERT INTO donor_profiles (user_id, donor_type, tax_id, billing_address,
                    is_recurring_donor, preferred_payment_method, communication_preferences, notes)
                VALUES ($1, COALESCE($2, 'individual'), COALESCE($3, ''), COALESCE($4, ''),
                    COALESCE($5, false), COALESCE($6, ''), COALESCE($7, '{{}}'::jsonb),
                    COALESCE($8, ''))
                RETURNING *
             )
             {SELECT} FROM d JOIN users u ON u.id = d.user_id"
        );
        sqlx::query_as::<_, DonorProfile>(&query)
            .bind(input.user_id)
            .bind(&input.donor_type)
            .bind(&input.tax_id)
            .bind(&input.billing_address)
            .bind(input.is_recurring_donor)
            .bind(&input.preferred_payment_method)
            .bind(&input.communication_preferences)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DonorProfile>, sqlx::Error> {
        let query = format!(
            "{SELECT} FROM donor_profiles d JOIN users u ON u.id = d.user_id WHERE d.id = $1"
        );
        sqlx::query_as::<_, DonorProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DonorProfile>, sqlx::Error> {
        let query = format!(
            "{SELECT} FROM donor_profiles d JOIN users u ON u.id = d.user_id WHERE d.user_id = $1"
        );
        sqlx::query_as::<_, DonorProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List profiles, largest donors first.
    pub async fn list(
        pool: &PgPool,
        params: &DonorQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonorProfile>, sqlx::Error> {
        let query = format!(
            "{SELECT} FROM donor_profiles d JOIN users u ON u.id = d.user_id {FILTER}
             ORDER BY d.total_donated DESC, d.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, DonorProfile>(&query)
            .bind(&params.donor_type)
            .bind(params.is_recurring_donor)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, params: &DonorQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM donor_profiles d {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&params.donor_type)
            .bind(params.is_recurring_donor)
            .fetch_one(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDonorProfile,
    ) -> Result<Option<DonorProfile>, sqlx::Error> {
        let query = format!(
            "WITH d AS (
                UPDATE donor_profiles SET
                    donor_type = COALESCE($2, donor_type),
                    tax_id = COALESCE($3, tax_id),
                    billing_address = COALESCE($4, billing_address),
                    is_recurring_donor = COALESCE($5, is_recurring_donor),
                    preferred_payment_method = COALESCE($6, preferred_payment_method),
                    communication_preferences = COALESCE($7, communication_preferences),
                    notes = COALESCE($8, notes)
                WHERE id = $1
                RETURNING *
             )
             {SELECT} FROM d JOIN users u ON u.id = d.user_id"
        );
        sqlx::query_as::<_, DonorProfile>(&query)
            .bind(id)
            .bind(&input.donor_type)
            .bind(&input.tax_id)
            .bind(&input.billing_address)
            .bind(input.is_recurring_donor)
            .bind(&input.preferred_payment_method)
            .bind(&input.communication_preferences)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donor_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read a donor's running totals, locking the row for the rest of the
    /// transaction.
    pub async fn lock_totals(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<DonorTotals>, sqlx::Error> {
        let row: Option<(Money, i32, Option<Date>, Option<Date>)> = sqlx::query_as(
            "SELECT total_donated, donation_count, first_donation_date, last_donation_date
             FROM donor_profiles WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(
            |(total_donated, donation_count, first_donation_date, last_donation_date)| DonorTotals {
                total_donated,
                donation_count,
                first_donation_date,
                last_donation_date,
            },
        ))
    }

    /// Write back totals computed from [`Self::lock_totals`].
    pub async fn save_totals(
        conn: &mut PgConnection,
        id: DbId,
        totals: &DonorTotals,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE donor_profiles SET
                total_donated = $2,
                donation_count = $3,
                first_donation_date = $4,
                last_donation_date = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(totals.total_donated)
        .bind(totals.donation_count)
        .bind(totals.first_donation_date)
        .bind(totals.last_donation_date)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

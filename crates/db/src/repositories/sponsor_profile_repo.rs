//! Repository for the `sponsor_profiles` table.

use bns_core::sponsors::{
    BRAND_MENTION_TYPES, DELIVERABLE_COMPLETED, DELIVERABLE_DEDICATED_CONTENT,
};
use bns_core::types::{Date, DbId, Money};
use sqlx::PgPool;

use crate::models::sponsor_profile::{
    CreateSponsorProfile, DeliverableCounts, SponsorProfile, SponsorQuery, SponsorSummary,
    UpdateSponsorProfile,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, company_name, logo_url, website, level, contract_value, \
                       contract_start, contract_end, benefits_claimed, brand_visibility_slots, \
                       dedicated_content_pieces, event_sponsorships, account_manager_id, \
                       is_active, \
                       created_at, updated_at";

/// `$1` level, `$2` active flag.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR level = $1)
                        AND ($2::BOOLEAN IS NULL OR is_active = $2)";

/// Provides CRUD operations and dashboard aggregates for sponsors.
pub struct SponsorProfileRepo;

impl SponsorProfileRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSponsorProfile,
    ) -> Result<SponsorProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO sponsor_profiles (user_id, company_name, logo_url, website, level,
                contract_value, contract_start, contract_end, benefits_claimed,
                brand_visibility_slots, dedicated_content_pieces, event_sponsorships,
                account_manager_id, is_active)
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, 'bronze'), COALESCE($6, 0), $7, $8,
                COALESCE($9, '[]'::jsonb), COALESCE($10, 0), COALESCE($11, 0), COALESCE($12, 0),
                $13, COALESCE($14, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SponsorProfile>(&query)
            .bind(input.user_id)
            .bind(&input.company_name)
            .bind(&input.logo_url)
            .bind(&input.website)
            .bind(&input.level)
            .bind(input.contract_value)
            .bind(input.contract_start)
            .bind(input.contract_end)
            .bind(&input.benefits_claimed)
            .bind(input.brand_visibility_slots)
            .bind(input.dedicated_content_pieces)
            .bind(input.event_sponsorships)
            .bind(input.account_manager_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SponsorProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sponsor_profiles WHERE id = $1");
        sqlx::query_as::<_, SponsorProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Summary used when a sponsor is embedded in content.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SponsorSummary>, sqlx::Error> {
        sqlx::query_as::<_, SponsorSummary>(
            "SELECT id, company_name, logo_url, website, level FROM sponsor_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List sponsors, highest contract value first.
    pub async fn list(
        pool: &PgPool,
        params: &SponsorQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SponsorProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sponsor_profiles {FILTER}
             ORDER BY contract_value DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SponsorProfile>(&query)
            .bind(&params.level)
            .bind(params.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, params: &SponsorQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM sponsor_profiles {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&params.level)
            .bind(params.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSponsorProfile,
    ) -> Result<Option<SponsorProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE sponsor_profiles SET
                company_name = COALESCE($2, company_name),
                logo_url = COALESCE($3, logo_url),
                website = COALESCE($4, website),
                level = COALESCE($5, level),
                contract_value = COALESCE($6, contract_value),
                contract_start = COALESCE($7, contract_start),
                contract_end = COALESCE($8, contract_end),
                benefits_claimed = COALESCE($9, benefits_claimed),
                brand_visibility_slots = COALESCE($10, brand_visibility_slots),
                dedicated_content_pieces = COALESCE($11, dedicated_content_pieces),
                event_sponsorships = COALESCE($12, event_sponsorships),
                account_manager_id = COALESCE($13, account_manager_id),
                is_active = COALESCE($14, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SponsorProfile>(&query)
            .bind(id)
            .bind(&input.company_name)
            .bind(&input.logo_url)
            .bind(&input.website)
            .bind(&input.level)
            .bind(input.contract_value)
            .bind(input.contract_start)
            .bind(input.contract_end)
            .bind(&input.benefits_claimed)
            .bind(input.brand_visibility_slots)
            .bind(input.dedicated_content_pieces)
            .bind(input.event_sponsorships)
            .bind(input.account_manager_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sponsor_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deliverable counts for one sponsor as of `today`.
    pub async fn deliverable_counts(
        pool: &PgPool,
        sponsor_id: DbId,
        month_start: Date,
        today: Date,
    ) -> Result<DeliverableCounts, sqlx::Error> {
        sqlx::query_as::<_, DeliverableCounts>(
            "SELECT
                COALESCE(SUM(quantity_delivered) FILTER (WHERE deliverable_type = $2), 0)::BIGINT
                    AS dedicated_content_delivered,
                COUNT(*) FILTER (WHERE deliverable_type = ANY($3) AND status = $4
                                   AND completed_date >= $5)
                    AS brand_mentions_this_month,
                COUNT(*) FILTER (WHERE status <> $4) AS open_deliverables,
                COUNT(*) FILTER (WHERE status <> $4 AND due_date < $6) AS overdue_deliverables
             FROM sponsorship_deliverables
             WHERE sponsor_id = $1",
        )
        .bind(sponsor_id)
        .bind(DELIVERABLE_DEDICATED_CONTENT)
        .bind(BRAND_MENTION_TYPES)
        .bind(DELIVERABLE_COMPLETED)
        .bind(month_start)
        .bind(today)
        .fetch_one(pool)
        .await
    }

    /// Total and active sponsor counts plus summed contract value of active
    /// sponsors.
    pub async fn totals(pool: &PgPool) -> Result<(i64, i64, Money), sqlx::Error> {
        sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE is_active),
                    COALESCE(SUM(contract_value) FILTER (WHERE is_active), 0)
             FROM sponsor_profiles",
        )
        .fetch_one(pool)
        .await
    }

    /// Active sponsor counts per level.
    pub async fn count_by_level(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT level, COUNT(*) FROM sponsor_profiles
             WHERE is_active
             GROUP BY level
             ORDER BY level",
        )
        .fetch_all(pool)
        .await
    }

    /// Active sponsors with the largest contracts.
    pub async fn top(pool: &PgPool, limit: i64) -> Result<Vec<SponsorProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sponsor_profiles
             WHERE is_active
             ORDER BY contract_value DESC, id
             LIMIT $1"
        );
        sqlx::query_as::<_, SponsorProfile>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `sponsor_assets` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::sponsor_asset::{CreateSponsorAsset, SponsorAsset, UpdateSponsorAsset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sponsor_id, name, file_url, asset_type, is_primary, uploaded_at";

/// `$1` sponsor id.
const FILTER: &str = "WHERE ($1::BIGINT IS NULL OR sponsor_id = $1)";

/// Provides CRUD operations for sponsor brand assets.
pub struct SponsorAssetRepo;

impl SponsorAssetRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSponsorAsset,
    ) -> Result<SponsorAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO sponsor_assets (sponsor_id, name, file_url, asset_type, is_primary)
             VALUES ($1, $2, $3, COALESCE($4, 'other'), COALESCE($5, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SponsorAsset>(&query)
            .bind(input.sponsor_id)
            .bind(&input.name)
            .bind(&input.file_url)
            .bind(&input.asset_type)
            .bind(input.is_primary)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SponsorAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sponsor_assets WHERE id = $1");
        sqlx::query_as::<_, SponsorAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assets, primary assets first, optionally for one sponsor.
    pub async fn list(
        pool: &PgPool,
        sponsor_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SponsorAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sponsor_assets {FILTER}
             ORDER BY is_primary DESC, uploaded_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SponsorAsset>(&query)
            .bind(sponsor_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, sponsor_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM sponsor_assets {FILTER}");
        sqlx::query_scalar(&query)
            .bind(sponsor_id)
            .fetch_one(pool)
            .await
    }

    /// Every asset of one sponsor, primary first.
    pub async fn by_sponsor(
        pool: &PgPool,
        sponsor_id: DbId,
    ) -> Result<Vec<SponsorAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sponsor_assets WHERE sponsor_id = $1
             ORDER BY is_primary DESC, uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, SponsorAsset>(&query)
            .bind(sponsor_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSponsorAsset,
    ) -> Result<Option<SponsorAsset>, sqlx::Error> {
        let query = format!(
            "UPDATE sponsor_assets SET
                name = COALESCE($2, name),
                file_url = COALESCE($3, file_url),
                asset_type = COALESCE($4, asset_type),
                is_primary = COALESCE($5, is_primary)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SponsorAsset>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.file_url)
            .bind(&input.asset_type)
            .bind(input.is_primary)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sponsor_assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

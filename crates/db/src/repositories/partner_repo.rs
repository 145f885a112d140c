//! Repository for the `consortium_partners` table.

use sqlx::PgPool;

use crate::models::partner::{ConsortiumPartner, CreatePartner, UpdatePartner};
use crate::repositories::support::available_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, logo_url, description, website, contact_person_id, \
                       content_contribution_weight, joined_date, is_active, created_at, updated_at";

/// `$1` true restricts to active partners.
const FILTER: &str = "WHERE (NOT $1 OR is_active)";

/// Provides CRUD operations for consortium partners.
pub struct PartnerRepo;

impl PartnerRepo {
    /// Insert a partner. A missing slug is derived from the name.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePartner,
    ) -> Result<ConsortiumPartner, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "consortium_partners", &input.name).await?,
        };
        let query = format!(
            "INSERT INTO consortium_partners (name, slug, logo_url, description, website,
                contact_person_id, content_contribution_weight, joined_date, is_active)
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), $6, COALESCE($7, 1),
                COALESCE($8, CURRENT_DATE), COALESCE($9, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConsortiumPartner>(&query)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.logo_url)
            .bind(&input.description)
            .bind(&input.website)
            .bind(input.contact_person_id)
            .bind(input.content_contribution_weight)
            .bind(input.joined_date)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a partner by slug, optionally only when active.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        active_only: bool,
    ) -> Result<Option<ConsortiumPartner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM consortium_partners {FILTER} AND slug = $2");
        sqlx::query_as::<_, ConsortiumPartner>(&query)
            .bind(active_only)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List partners, heaviest contributors first.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ConsortiumPartner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM consortium_partners {FILTER}
             ORDER BY content_contribution_weight DESC, name
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ConsortiumPartner>(&query)
            .bind(active_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, active_only: bool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM consortium_partners {FILTER}");
        sqlx::query_scalar(&query)
            .bind(active_only)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        slug: &str,
        input: &UpdatePartner,
    ) -> Result<Option<ConsortiumPartner>, sqlx::Error> {
        let query = format!(
            "UPDATE consortium_partners SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                logo_url = COALESCE($4, logo_url),
                description = COALESCE($5, description),
                website = COALESCE($6, website),
                contact_person_id = COALESCE($7, contact_person_id),
                content_contribution_weight = COALESCE($8, content_contribution_weight),
                joined_date = COALESCE($9, joined_date),
                is_active = COALESCE($10, is_active)
             WHERE slug = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConsortiumPartner>(&query)
            .bind(slug)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.logo_url)
            .bind(&input.description)
            .bind(&input.website)
            .bind(input.contact_person_id)
            .bind(input.content_contribution_weight)
            .bind(input.joined_date)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM consortium_partners WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

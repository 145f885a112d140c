//! Repository for the `organization_profile` singleton.

use sqlx::PgPool;

use crate::models::organization::{OrganizationProfile, UpdateOrganizationProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, organization_name, consortium_name, tagline, brand_promise, \
                       description, \
                       vision, mission, headquarters, registration_country, year_established, \
                       email_general, email_partnerships, email_media, phone, website, tiktok, \
                       instagram, twitter, youtube, facebook, primary_color, secondary_color, \
                       alert_color, success_color, neutral_dark, neutral_light, countries_reached, \
                       budget_reports_analyzed, citizens_engaged, youth_champion_trainings, \
                       partner_organizations, programs_delivered, is_independent, is_non_partisan, \
                       document_version, created_at, updated_at";

/// Reads and patches the single organisation profile row.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// The profile row, if one exists. With several rows the oldest wins.
    pub async fn get(pool: &PgPool) -> Result<Option<OrganizationProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organization_profile ORDER BY id LIMIT 1");
        sqlx::query_as::<_, OrganizationProfile>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Patch the profile row. Returns `None` when no row exists.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateOrganizationProfile,
    ) -> Result<Option<OrganizationProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE organization_profile SET
                organization_name = COALESCE($1, organization_name),
                consortium_name = COALESCE($2, consortium_name),
                tagline = COALESCE($3, tagline),
                brand_promise = COALESCE($4, brand_promise),
                description = COALESCE($5, description),
                vision = COALESCE($6, vision),
                mission = COALESCE($7, mission),
                headquarters = COALESCE($8, headquarters),
                registration_country = COALESCE($9, registration_country),
                year_established = COALESCE($10, year_established),
                email_general = COALESCE($11, email_general),
                email_partnerships = COALESCE($12, email_partnerships),
                email_media = COALESCE($13, email_media),
                phone = COALESCE($14, phone),
                website = COALESCE($15, website),
                tiktok = COALESCE($16, tiktok),
                instagram = COALESCE($17, instagram),
                twitter = COALESCE($18, twitter),
                youtube = COALESCE($19, youtube),
                facebook = COALESCE($20, facebook),
                primary_color = COALESCE($21, primary_color),
                secondary_color = COALESCE($22, secondary_color),
                alert_color = COALESCE($23, alert_color),
                success_color = COALESCE($24, success_color),
                neutral_dark = COALESCE($25, neutral_dark),
                neutral_light = COALESCE($26, neutral_light),
                countries_reached = COALESCE($27, countries_reached),
                budget_reports_analyzed = COALESCE($28, budget_reports_analyzed),
                citizens_engaged = COALESCE($29, citizens_engaged),
                youth_champion_trainings = COALESCE($30, youth_champion_trainings),
                partner_organizations = COALESCE($31, partner_organizations),
                programs_delivered = COALESCE($32, programs_delivered),
                is_independent = COALESCE($33, is_independent),
                is_non_partisan = COALESCE($34, is_non_partisan),
                document_version = COALESCE($35, document_version)
             WHERE id = (SELECT id FROM organization_profile ORDER BY id LIMIT 1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationProfile>(&query)
            .bind(&input.organization_name)
            .bind(&input.consortium_name)
            .bind(&input.tagline)
            .bind(&input.brand_promise)
            .bind(&input.description)
            .bind(&input.vision)
            .bind(&input.mission)
            .bind(&input.headquarters)
            .bind(&input.registration_country)
            .bind(input.year_established)
            .bind(&input.email_general)
            .bind(&input.email_partnerships)
            .bind(&input.email_media)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(&input.tiktok)
            .bind(&input.instagram)
            .bind(&input.twitter)
            .bind(&input.youtube)
            .bind(&input.facebook)
            .bind(&input.primary_color)
            .bind(&input.secondary_color)
            .bind(&input.alert_color)
            .bind(&input.success_color)
            .bind(&input.neutral_dark)
            .bind(&input.neutral_light)
            .bind(input.countries_reached)
            .bind(input.budget_reports_analyzed)
            .bind(input.citizens_engaged)
            .bind(input.youth_champion_trainings)
            .bind(input.partner_organizations)
            .bind(input.programs_delivered)
            .bind(input.is_independent)
            .bind(input.is_non_partisan)
            .bind(&input.document_version)
            .fetch_optional(pool)
            .await
    }
}

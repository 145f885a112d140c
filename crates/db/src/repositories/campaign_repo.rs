//! Repository for the `newsletter_campaigns` table and its link tables.

use bns_core::newsletter::{CAMPAIGN_DRAFT, CAMPAIGN_SCHEDULED, CAMPAIGN_SENT};
use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog_post::PostSummary;
use crate::models::campaign::{Campaign, CampaignQuery, CreateCampaign, UpdateCampaign};
use crate::models::category::CategorySummary;
use crate::repositories::support::replace_links;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, subject, preheader, campaign_type, status, html_content, \
                       text_content, featured_video_id, target_preferences, scheduled_at, sent_at, \
                       total_recipients, delivered_count, open_count, click_count, bounce_count, \
                       unsubscribe_count, sponsored_by_id, created_at, updated_at";

/// `$1` status, `$2` campaign type.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR status = $1)
      AND ($2::TEXT IS NULL OR campaign_type = $2)";

/// Provides CRUD and status actions for newsletter campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a draft campaign with its featured posts and target categories.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO newsletter_campaigns (name, subject, preheader, campaign_type, status,
                html_content, text_content, featured_video_id, target_preferences, scheduled_at,
                sponsored_by_id)
             VALUES ($1, $2, COALESCE($3, ''), $4, '{CAMPAIGN_DRAFT}', COALESCE($5, ''),
                COALESCE($6, ''), $7, COALESCE($8, '[]'::jsonb), $9, $10)
             RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.name)
            .bind(&input.subject)
            .bind(&input.preheader)
            .bind(&input.campaign_type)
            .bind(&input.html_content)
            .bind(&input.text_content)
            .bind(input.featured_video_id)
            .bind(&input.target_preferences)
            .bind(input.scheduled_at)
            .bind(input.sponsored_by_id)
            .fetch_one(&mut *tx)
            .await?;
        replace_links(
            &mut *tx,
            "campaign_featured_posts",
            "campaign_id",
            "post_id",
            campaign.id,
            &input.featured_post_ids,
        )
        .await?;
        replace_links(
            &mut *tx,
            "campaign_target_categories",
            "campaign_id",
            "category_id",
            campaign.id,
            &input.target_category_ids,
        )
        .await?;
        tx.commit().await?;
        Ok(campaign)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM newsletter_campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &CampaignQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_campaigns {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&filter.status)
            .bind(&filter.campaign_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &CampaignQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM newsletter_campaigns {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.status)
            .bind(&filter.campaign_type)
            .fetch_one(pool)
            .await
    }

    /// Update content fields. Link sets are replaced only when supplied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE newsletter_campaigns SET
                name = COALESCE($2, name),
                subject = COALESCE($3, subject),
                preheader = COALESCE($4, preheader),
                campaign_type = COALESCE($5, campaign_type),
                html_content = COALESCE($6, html_content),
                text_content = COALESCE($7, text_content),
                featured_video_id = COALESCE($8, featured_video_id),
                target_preferences = COALESCE($9, target_preferences),
                scheduled_at = COALESCE($10, scheduled_at),
                total_recipients = COALESCE($11, total_recipients),
                sponsored_by_id = COALESCE($12, sponsored_by_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.subject)
            .bind(&input.preheader)
            .bind(&input.campaign_type)
            .bind(&input.html_content)
            .bind(&input.text_content)
            .bind(input.featured_video_id)
            .bind(&input.target_preferences)
            .bind(input.scheduled_at)
            .bind(input.total_recipients)
            .bind(input.sponsored_by_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(campaign) = campaign else {
            return Ok(None);
        };
        if let Some(ids) = &input.featured_post_ids {
            replace_links(&mut *tx, "campaign_featured_posts", "campaign_id", "post_id", id, ids)
                .await?;
        }
        if let Some(ids) = &input.target_category_ids {
            replace_links(
                &mut *tx,
                "campaign_target_categories",
                "campaign_id",
                "category_id",
                id,
                ids,
            )
            .await?;
        }
        tx.commit().await?;
        Ok(Some(campaign))
    }

    /// Queue a campaign for sending now.
    pub async fn mark_scheduled(pool: &PgPool, id: DbId) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_campaigns SET status = '{CAMPAIGN_SCHEDULED}', scheduled_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_campaigns SET status = '{CAMPAIGN_SENT}', sent_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM newsletter_campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn featured_posts(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<PostSummary>, sqlx::Error> {
        sqlx::query_as::<_, PostSummary>(
            "SELECT p.id, p.title, p.slug, p.excerpt, p.post_type, p.featured_image_url,
                    p.published_at, p.read_time_minutes
             FROM blog_posts p JOIN campaign_featured_posts cfp ON cfp.post_id = p.id
             WHERE cfp.campaign_id = $1
             ORDER BY p.published_at DESC NULLS LAST, p.id",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    pub async fn target_categories(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        sqlx::query_as::<_, CategorySummary>(
            "SELECT c.id, c.name, c.slug, c.color
             FROM categories c JOIN campaign_target_categories ctc ON ctc.category_id = c.id
             WHERE ctc.campaign_id = $1
             ORDER BY c.sort_order, c.name",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }
}

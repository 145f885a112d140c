//! Newsletter campaign model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `newsletter_campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub subject: String,
    pub preheader: String,
    pub campaign_type: String,
    pub status: String,
    pub html_content: String,
    pub text_content: String,
    pub featured_video_id: Option<DbId>,
    pub target_preferences: serde_json::Value,
    pub scheduled_at: Option<Timestamp>,
    pub sent_at: Option<Timestamp>,
    pub total_recipients: i32,
    pub delivered_count: i32,
    pub open_count: i32,
    pub click_count: i32,
    pub bounce_count: i32,
    pub unsubscribe_count: i32,
    pub sponsored_by_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    pub subject: String,
    pub preheader: Option<String>,
    pub campaign_type: String,
    pub html_content: Option<String>,
    pub text_content: Option<String>,
    pub featured_video_id: Option<DbId>,
    pub target_preferences: Option<serde_json::Value>,
    pub scheduled_at: Option<Timestamp>,
    pub sponsored_by_id: Option<DbId>,
    #[serde(default)]
    pub featured_post_ids: Vec<DbId>,
    #[serde(default)]
    pub target_category_ids: Vec<DbId>,
}

/// Status changes go through the send / mark-sent actions, not this DTO.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub preheader: Option<String>,
    pub campaign_type: Option<String>,
    pub html_content: Option<String>,
    pub text_content: Option<String>,
    pub featured_video_id: Option<DbId>,
    pub target_preferences: Option<serde_json::Value>,
    pub scheduled_at: Option<Timestamp>,
    pub total_recipients: Option<i32>,
    pub sponsored_by_id: Option<DbId>,
    pub featured_post_ids: Option<Vec<DbId>>,
    pub target_category_ids: Option<Vec<DbId>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CampaignQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
}

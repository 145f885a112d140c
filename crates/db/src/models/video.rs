//! Video model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub platform: String,
    pub external_id: String,
    pub external_url: String,
    pub embed_url: String,
    pub thumbnail_url: String,
    pub content_type: String,
    pub duration_seconds: Option<i32>,
    pub view_count: i64,
    pub like_count: i64,
    pub share_count: i64,
    pub comment_count: i64,
    pub last_metrics_update: Option<Timestamp>,
    pub is_featured: bool,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub display_order: i32,
    pub author_id: Option<DbId>,
    pub playlist_id: Option<DbId>,
    pub sponsored_by_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Video reference embedded in posts and campaigns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub platform: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub platform: String,
    pub external_id: String,
    pub external_url: String,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub content_type: String,
    pub duration_seconds: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub published_at: Option<Timestamp>,
    pub display_order: Option<i32>,
    pub playlist_id: Option<DbId>,
    pub sponsored_by_id: Option<DbId>,
    #[serde(default)]
    pub category_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub content_type: Option<String>,
    pub duration_seconds: Option<i32>,
    pub view_count: Option<i64>,
    pub like_count: Option<i64>,
    pub share_count: Option<i64>,
    pub comment_count: Option<i64>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub published_at: Option<Timestamp>,
    pub display_order: Option<i32>,
    pub playlist_id: Option<DbId>,
    pub sponsored_by_id: Option<DbId>,
    /// Replaces the category set when present.
    pub category_ids: Option<Vec<DbId>>,
}

/// Filters for the public video list.
#[derive(Debug, Default, Deserialize)]
pub struct VideoQuery {
    pub platform: Option<String>,
    pub content_type: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    /// Playlist slug.
    pub playlist: Option<String>,
    pub search: Option<String>,
    /// `published_at`, `view_count` or `created_at`, optionally prefixed `-`.
    pub ordering: Option<String>,
}

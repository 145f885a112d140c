//! Blog post model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub content_html: String,
    pub post_type: String,
    pub tags: serde_json::Value,
    pub featured_image_url: Option<String>,
    pub featured_image_caption: String,
    pub author_id: Option<DbId>,
    pub status: String,
    pub published_at: Option<Timestamp>,
    pub scheduled_publish_at: Option<Timestamp>,
    pub view_count: i64,
    pub read_time_minutes: i32,
    pub allow_comments: bool,
    pub meta_title: String,
    pub meta_description: String,
    pub sponsored_by_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Post reference embedded in related-post lists and campaigns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub post_type: String,
    pub featured_image_url: Option<String>,
    pub published_at: Option<Timestamp>,
    pub read_time_minutes: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub content_html: Option<String>,
    pub post_type: String,
    pub tags: Option<serde_json::Value>,
    pub featured_image_url: Option<String>,
    pub featured_image_caption: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<Timestamp>,
    pub scheduled_publish_at: Option<Timestamp>,
    pub allow_comments: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub sponsored_by_id: Option<DbId>,
    #[serde(default)]
    pub category_ids: Vec<DbId>,
    #[serde(default)]
    pub co_author_ids: Vec<DbId>,
    #[serde(default)]
    pub related_video_ids: Vec<DbId>,
    #[serde(default)]
    pub related_post_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub content_html: Option<String>,
    pub post_type: Option<String>,
    pub tags: Option<serde_json::Value>,
    pub featured_image_url: Option<String>,
    pub featured_image_caption: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<Timestamp>,
    pub scheduled_publish_at: Option<Timestamp>,
    pub allow_comments: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub sponsored_by_id: Option<DbId>,
    pub category_ids: Option<Vec<DbId>>,
    pub co_author_ids: Option<Vec<DbId>>,
    pub related_video_ids: Option<Vec<DbId>>,
    pub related_post_ids: Option<Vec<DbId>>,
}

/// Filters for the post list.
#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    pub post_type: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// Author username.
    pub author: Option<String>,
    pub search: Option<String>,
    /// Staff only; anonymous callers always see published posts.
    pub status: Option<String>,
}

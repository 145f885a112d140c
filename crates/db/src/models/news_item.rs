//! News item model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `news_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsItem {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub source_url: String,
    pub is_breaking: bool,
    pub published_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNewsItem {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    pub source_url: Option<String>,
    pub is_breaking: Option<bool>,
    pub expires_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNewsItem {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub source_url: Option<String>,
    pub is_breaking: Option<bool>,
    pub expires_at: Option<Timestamp>,
}

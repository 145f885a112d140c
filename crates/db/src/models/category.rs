//! Content category model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category with the number of videos and posts filed under it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCounts {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    pub video_count: i64,
    pub post_count: i64,
}

/// Category reference embedded in videos, posts and subscribers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

//! Media library model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    /// Path relative to the media root.
    pub file_path: String,
    pub filename: String,
    pub media_type: String,
    pub title: String,
    pub alt_text: String,
    pub caption: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub folder: String,
    pub tags: serde_json::Value,
    pub uploaded_by_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Insert DTO assembled by the upload handler.
#[derive(Debug, Clone)]
pub struct CreateMediaItem {
    pub file_path: String,
    pub filename: String,
    pub media_type: String,
    pub title: String,
    pub alt_text: String,
    pub caption: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub folder: String,
    pub tags: serde_json::Value,
    pub uploaded_by_id: Option<DbId>,
}

/// Metadata patch. The stored file itself is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMediaItem {
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub folder: Option<String>,
    pub tags: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    pub folder: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub search: Option<String>,
}

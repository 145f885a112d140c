//! Playlist model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `playlists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub difficulty_level: String,
    pub estimated_duration_minutes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Playlist reference embedded in videos.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylist {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_featured: Option<bool>,
    pub difficulty_level: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlaylist {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_featured: Option<bool>,
    pub difficulty_level: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaylistQuery {
    pub is_featured: Option<bool>,
    pub difficulty_level: Option<String>,
}

//! Video engagement event model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `video_engagements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoEngagement {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: Option<DbId>,
    pub session_id: String,
    pub event_type: String,
    pub timestamp_seconds: i32,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordEngagement {
    pub video_id: DbId,
    pub session_id: String,
    pub event_type: String,
    pub timestamp_seconds: Option<i32>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EngagementQuery {
    pub video: Option<DbId>,
    pub event_type: Option<String>,
}

/// Event count for one event type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventCount {
    pub event_type: String,
    pub count: i64,
}

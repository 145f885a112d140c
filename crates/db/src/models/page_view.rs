//! Page view model and DTOs.

use bns_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `page_views` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageView {
    pub id: DbId,
    pub url: String,
    pub path: String,
    pub content_type: String,
    pub content_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub session_id: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referrer: String,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub country: String,
    pub city: String,
    pub created_at: Timestamp,
}

/// Public record request. Client details are derived from headers.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPageView {
    pub url: String,
    pub path: String,
    pub content_type: Option<String>,
    pub content_id: Option<DbId>,
    pub session_id: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Insert DTO assembled by the record handler.
#[derive(Debug, Clone)]
pub struct CreatePageView {
    pub url: String,
    pub path: String,
    pub content_type: String,
    pub content_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub session_id: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referrer: String,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub country: String,
    pub city: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageViewQuery {
    pub content_type: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// View count for one path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PathCount {
    pub path: String,
    pub views: i64,
}

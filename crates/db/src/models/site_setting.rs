//! Site setting model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `site_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSetting {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub value_type: String,
    pub category: String,
    pub description: String,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSiteSetting {
    pub key: String,
    #[serde(default)]
    pub value: String,
    pub value_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSiteSetting {
    pub value: Option<String>,
    pub value_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingQuery {
    pub category: Option<String>,
}

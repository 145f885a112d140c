//! Widget model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `widgets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Widget {
    pub id: DbId,
    pub name: String,
    pub widget_type: String,
    pub title: String,
    pub content: String,
    pub settings: serde_json::Value,
    pub css_class: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWidget {
    pub name: String,
    pub widget_type: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub settings: Option<serde_json::Value>,
    pub css_class: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWidget {
    pub name: Option<String>,
    pub widget_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub settings: Option<serde_json::Value>,
    pub css_class: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WidgetQuery {
    #[serde(rename = "type")]
    pub widget_type: Option<String>,
}

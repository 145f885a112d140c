//! Menu and menu item models and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `menus` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Menu {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub location: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A menu with its number of active items.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub menu: Menu,
    pub item_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenu {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenu {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

/// A row from the `menu_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuItem {
    pub id: DbId,
    pub menu_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub link_type: String,
    pub page_id: Option<DbId>,
    pub url: String,
    pub category_id: Option<DbId>,
    pub icon: String,
    pub css_class: String,
    pub target_new_tab: bool,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A menu item joined with the slugs its URL resolves from.
#[derive(Debug, Clone, FromRow)]
pub struct MenuItemLink {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub link_type: String,
    pub url: String,
    pub page_slug: Option<String>,
    pub category_slug: Option<String>,
    pub icon: String,
    pub css_class: String,
    pub target_new_tab: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItem {
    pub menu_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub link_type: Option<String>,
    pub page_id: Option<DbId>,
    pub url: Option<String>,
    pub category_id: Option<DbId>,
    pub icon: Option<String>,
    pub css_class: Option<String>,
    pub target_new_tab: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenuItem {
    pub parent_id: Option<DbId>,
    pub title: Option<String>,
    pub link_type: Option<String>,
    pub page_id: Option<DbId>,
    pub url: Option<String>,
    pub category_id: Option<DbId>,
    pub icon: Option<String>,
    pub css_class: Option<String>,
    pub target_new_tab: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuItemQuery {
    pub menu: Option<DbId>,
}

//! CMS page model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub subtitle: String,
    pub content: String,
    pub content_html: String,
    pub template: String,
    pub meta_title: String,
    pub meta_description: String,
    pub featured_image_url: Option<String>,
    pub video_url: String,
    pub status: String,
    pub is_featured: bool,
    pub show_in_nav: bool,
    pub nav_order: i32,
    pub show_sidebar: bool,
    pub show_comments: bool,
    pub full_width: bool,
    pub background_color: String,
    pub background_image_url: Option<String>,
    pub author_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Navigation entry for the site header.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NavPage {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub nav_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub title: String,
    pub slug: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub content_html: Option<String>,
    pub template: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub featured_image_url: Option<String>,
    pub video_url: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub show_in_nav: Option<bool>,
    pub nav_order: Option<i32>,
    pub show_sidebar: Option<bool>,
    pub show_comments: Option<bool>,
    pub full_width: Option<bool>,
    pub background_color: Option<String>,
    pub background_image_url: Option<String>,
    pub published_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub content_html: Option<String>,
    pub template: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub featured_image_url: Option<String>,
    pub video_url: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub show_in_nav: Option<bool>,
    pub nav_order: Option<i32>,
    pub show_sidebar: Option<bool>,
    pub show_comments: Option<bool>,
    pub full_width: Option<bool>,
    pub background_color: Option<String>,
    pub background_image_url: Option<String>,
    pub published_at: Option<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Staff only.
    pub status: Option<String>,
    pub template: Option<String>,
    pub search: Option<String>,
}

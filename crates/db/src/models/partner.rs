//! Consortium partner model and DTOs.

use bns_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `consortium_partners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConsortiumPartner {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub description: String,
    pub website: String,
    pub contact_person_id: Option<DbId>,
    pub content_contribution_weight: i32,
    pub joined_date: Date,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a partner. `slug` defaults to one derived from `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartner {
    pub name: String,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_person_id: Option<DbId>,
    pub content_contribution_weight: Option<i32>,
    pub joined_date: Option<Date>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePartner {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_person_id: Option<DbId>,
    pub content_contribution_weight: Option<i32>,
    pub joined_date: Option<Date>,
    pub is_active: Option<bool>,
}

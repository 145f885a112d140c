//! Sponsor asset model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sponsor_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SponsorAsset {
    pub id: DbId,
    pub sponsor_id: DbId,
    pub name: String,
    pub file_url: String,
    pub asset_type: String,
    pub is_primary: bool,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSponsorAsset {
    pub sponsor_id: DbId,
    pub name: String,
    pub file_url: String,
    pub asset_type: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSponsorAsset {
    pub name: Option<String>,
    pub file_url: Option<String>,
    pub asset_type: Option<String>,
    pub is_primary: Option<bool>,
}

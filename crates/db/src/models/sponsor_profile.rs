//! Sponsor profile model and DTOs.

use bns_core::types::{Date, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sponsor_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SponsorProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub website: String,
    pub level: String,
    pub contract_value: Money,
    pub contract_start: Option<Date>,
    pub contract_end: Option<Date>,
    pub benefits_claimed: serde_json::Value,
    pub brand_visibility_slots: i32,
    pub dedicated_content_pieces: i32,
    pub event_sponsorships: i32,
    pub account_manager_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Sponsor reference embedded in sponsored content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SponsorSummary {
    pub id: DbId,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub website: String,
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSponsorProfile {
    pub user_id: DbId,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub level: Option<String>,
    pub contract_value: Option<Money>,
    pub contract_start: Option<Date>,
    pub contract_end: Option<Date>,
    pub benefits_claimed: Option<serde_json::Value>,
    pub brand_visibility_slots: Option<i32>,
    pub dedicated_content_pieces: Option<i32>,
    pub event_sponsorships: Option<i32>,
    pub account_manager_id: Option<DbId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSponsorProfile {
    pub company_name: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub level: Option<String>,
    pub contract_value: Option<Money>,
    pub contract_start: Option<Date>,
    pub contract_end: Option<Date>,
    pub benefits_claimed: Option<serde_json::Value>,
    pub brand_visibility_slots: Option<i32>,
    pub dedicated_content_pieces: Option<i32>,
    pub event_sponsorships: Option<i32>,
    pub account_manager_id: Option<DbId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SponsorQuery {
    pub level: Option<String>,
    pub is_active: Option<bool>,
}

/// Counts behind the sponsor deliverables summary.
#[derive(Debug, Clone, Default, FromRow)]
pub struct DeliverableCounts {
    pub dedicated_content_delivered: i64,
    pub brand_mentions_this_month: i64,
    pub open_deliverables: i64,
    pub overdue_deliverables: i64,
}

//! Sponsorship deliverable model and DTOs.

use bns_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sponsorship_deliverables` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deliverable {
    pub id: DbId,
    pub sponsor_id: DbId,
    pub deliverable_type: String,
    pub description: String,
    pub quantity_required: i32,
    pub quantity_delivered: i32,
    pub status: String,
    pub due_date: Date,
    pub completed_date: Option<Date>,
    pub notes: String,
    pub internal_notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeliverable {
    pub sponsor_id: DbId,
    pub deliverable_type: String,
    pub description: String,
    pub quantity_required: Option<i32>,
    pub due_date: Date,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub linked_post_ids: Vec<DbId>,
    #[serde(default)]
    pub linked_video_ids: Vec<DbId>,
    #[serde(default)]
    pub linked_campaign_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDeliverable {
    pub deliverable_type: Option<String>,
    pub description: Option<String>,
    pub quantity_required: Option<i32>,
    pub quantity_delivered: Option<i32>,
    pub status: Option<String>,
    pub due_date: Option<Date>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub linked_post_ids: Option<Vec<DbId>>,
    pub linked_video_ids: Option<Vec<DbId>>,
    pub linked_campaign_ids: Option<Vec<DbId>>,
}

/// Body of the progress action.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliverableProgress {
    pub quantity: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeliverableQuery {
    pub status: Option<String>,
    pub sponsor: Option<DbId>,
    /// `true` lists only open deliverables past their due date.
    pub overdue: Option<bool>,
}

/// Linked content ids of a deliverable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeliverableLinks {
    pub linked_post_ids: Vec<DbId>,
    pub linked_video_ids: Vec<DbId>,
    pub linked_campaign_ids: Vec<DbId>,
}

/// Deliverable counts per status, with overdue derived from due dates.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DeliverableStatusCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
}

//! Donor funnel event model and DTOs.

use bns_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `donor_funnel_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FunnelEvent {
    pub id: DbId,
    pub donor_id: DbId,
    pub stage: String,
    pub source: String,
    pub value: Option<Money>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFunnelEvent {
    pub donor_id: DbId,
    pub stage: String,
    pub source: Option<String>,
    pub value: Option<Money>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FunnelQuery {
    pub donor: Option<DbId>,
    pub stage: Option<String>,
}

/// Event count and summed value for one stage.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StageSummary {
    pub stage: String,
    pub count: i64,
    pub total_value: Money,
}

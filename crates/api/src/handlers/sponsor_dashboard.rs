//! Handler for `GET /sponsors/dashboard`: the staff overview of the
//! sponsorship programme.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use bns_core::sponsors::TOP_SPONSOR_LIMIT;
use bns_core::types::Money;
use bns_db::models::deliverable::DeliverableStatusCounts;
use bns_db::models::sponsor_profile::SponsorProfile;
use bns_db::repositories::{DeliverableRepo, SponsorProfileRepo};
use chrono::Utc;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SponsorDashboard {
    pub total_sponsors: i64,
    pub active_sponsors: i64,
    pub total_contract_value: Money,
    pub deliverables: DeliverableStatusCounts,
    pub sponsors_by_level: BTreeMap<String, i64>,
    pub top_sponsors: Vec<SponsorProfile>,
}

/// GET /api/v1/sponsors/dashboard
pub async fn get(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
) -> AppResult<Json<DataResponse<SponsorDashboard>>> {
    let today = Utc::now().date_naive();
    let (total_sponsors, active_sponsors, total_contract_value) =
        SponsorProfileRepo::totals(&state.pool).await?;
    let deliverables = DeliverableRepo::status_counts(&state.pool, today).await?;
    let sponsors_by_level = SponsorProfileRepo::count_by_level(&state.pool)
        .await?
        .into_iter()
        .collect();
    let top_sponsors = SponsorProfileRepo::top(&state.pool, TOP_SPONSOR_LIMIT).await?;

    Ok(Json(DataResponse {
        data: SponsorDashboard {
            total_sponsors,
            active_sponsors,
            total_contract_value,
            deliverables,
            sponsors_by_level,
            top_sponsors,
        },
    }))
}

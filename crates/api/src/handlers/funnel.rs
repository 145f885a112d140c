//! Handlers for the `/analytics/funnel` resource (staff only).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::analytics::{funnel_position, FUNNEL_STAGES};
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::types::DbId;
use bns_db::models::funnel_event::{CreateFunnelEvent, FunnelEvent, FunnelQuery, StageSummary};
use bns_db::repositories::FunnelRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// POST /api/v1/analytics/funnel
pub async fn record(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateFunnelEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<FunnelEvent>>)> {
    validate_choice("stage", &input.stage, FUNNEL_STAGES)?;
    let event = FunnelRepo::create(&state.pool, &input).await?;
    tracing::info!(
        funnel_event_id = event.id,
        donor_id = event.donor_id,
        stage = %event.stage,
        recorded_by = user.user_id,
        "Funnel event recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/analytics/funnel
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<FunnelQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<FunnelEvent>>>> {
    validate_optional_choice("stage", filter.stage.as_deref(), FUNNEL_STAGES)?;
    let events = FunnelRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = FunnelRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, events),
    }))
}

/// GET /api/v1/analytics/funnel/summary
///
/// Count and summed value per stage, in journey order.
pub async fn summary(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<StageSummary>>>> {
    let mut stages = FunnelRepo::summary(&state.pool).await?;
    stages.sort_by_key(|s| funnel_position(&s.stage));
    Ok(Json(DataResponse { data: stages }))
}

/// DELETE /api/v1/analytics/funnel/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FunnelRepo::delete(&state.pool, id).await? {
        tracing::info!(funnel_event_id = id, deleted_by = user.user_id, "Funnel event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("FunnelEvent", id))
    }
}

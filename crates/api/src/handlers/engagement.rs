//! Handlers for the `/analytics/engagement` resource (video player events).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::analytics::VALID_ENGAGEMENT_EVENTS;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::types::DbId;
use bns_db::models::video_engagement::{
    EngagementQuery, EventCount, RecordEngagement, VideoEngagement,
};
use bns_db::repositories::VideoEngagementRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::{PaginationParams, VideoIdParam};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Response of `GET /analytics/engagement/by-video`.
#[derive(Debug, Serialize)]
pub struct VideoEngagementSummary {
    pub video_id: DbId,
    pub total_events: i64,
    pub by_event_type: Vec<EventCount>,
}

/// POST /api/v1/analytics/engagement
pub async fn record(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Json(input): Json<RecordEngagement>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoEngagement>>)> {
    validate_choice("event_type", &input.event_type, VALID_ENGAGEMENT_EVENTS)?;
    if input.timestamp_seconds.is_some_and(|t| t < 0) {
        return Err(AppError::BadRequest("timestamp_seconds cannot be negative".into()));
    }
    let event = VideoEngagementRepo::create(&state.pool, auth.user_id(), &input).await?;
    tracing::debug!(
        engagement_id = event.id,
        video_id = event.video_id,
        event_type = %event.event_type,
        "Video engagement recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/analytics/engagement
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<EngagementQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<VideoEngagement>>>> {
    validate_optional_choice(
        "event_type",
        filter.event_type.as_deref(),
        VALID_ENGAGEMENT_EVENTS,
    )?;
    let events =
        VideoEngagementRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = VideoEngagementRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, events),
    }))
}

/// GET /api/v1/analytics/engagement/by-video?video_id=
pub async fn by_video(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Query(params): Query<VideoIdParam>,
) -> AppResult<Json<DataResponse<VideoEngagementSummary>>> {
    let video_id = params
        .video_id
        .ok_or_else(|| AppError::BadRequest("video_id required".into()))?;
    let by_event_type = VideoEngagementRepo::counts_for_video(&state.pool, video_id).await?;
    let total_events = by_event_type.iter().map(|c| c.count).sum();
    Ok(Json(DataResponse {
        data: VideoEngagementSummary {
            video_id,
            total_events,
            by_event_type,
        },
    }))
}

/// DELETE /api/v1/analytics/engagement/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if VideoEngagementRepo::delete(&state.pool, id).await? {
        tracing::info!(engagement_id = id, deleted_by = user.user_id, "Engagement deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("VideoEngagement", id))
    }
}

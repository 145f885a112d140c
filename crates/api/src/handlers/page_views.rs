//! Handlers for the `/analytics/pageviews` resource.
//!
//! Recording is public. Device, browser and OS come from the `User-Agent`
//! header; the caller's user id is attached when a valid token is present.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::analytics::{
    classify_user_agent, validate_date_range, SUMMARY_WINDOW_DAYS, TOP_PAGES_LIMIT,
};
use bns_core::types::DbId;
use bns_db::models::page_view::{
    CreatePageView, PageView, PageViewQuery, PathCount, RecordPageView,
};
use bns_db::repositories::PageViewRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Response of `GET /analytics/pageviews/summary`.
#[derive(Debug, Serialize)]
pub struct PageViewSummary {
    pub total_views: i64,
    pub views_this_week: i64,
    pub top_pages: Vec<PathCount>,
}

/// POST /api/v1/analytics/pageviews
pub async fn record(
    State(state): State<AppState>,
    auth: MaybeAuth,
    client: ClientMeta,
    Json(input): Json<RecordPageView>,
) -> AppResult<(StatusCode, Json<DataResponse<PageView>>)> {
    if input.path.trim().is_empty() {
        return Err(AppError::BadRequest("path is required".into()));
    }
    let user_agent = client.user_agent.unwrap_or_default();
    let info = classify_user_agent(&user_agent);

    let view = PageViewRepo::create(
        &state.pool,
        &CreatePageView {
            url: input.url,
            path: input.path,
            content_type: input.content_type.unwrap_or_default(),
            content_id: input.content_id,
            user_id: auth.user_id(),
            session_id: input.session_id.unwrap_or_default(),
            ip_address: client.ip_address,
            user_agent,
            referrer: input.referrer.unwrap_or_default(),
            device_type: info.device_type.to_string(),
            browser: info.browser.to_string(),
            os: info.os.to_string(),
            country: input.country.unwrap_or_default(),
            city: input.city.unwrap_or_default(),
        },
    )
    .await?;
    tracing::debug!(page_view_id = view.id, path = %view.path, "Page view recorded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/analytics/pageviews
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<PageViewQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<PageView>>>> {
    validate_date_range(filter.start_date, filter.end_date)?;
    let views = PageViewRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = PageViewRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, views),
    }))
}

/// GET /api/v1/analytics/pageviews/summary
pub async fn summary(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
) -> AppResult<Json<DataResponse<PageViewSummary>>> {
    let (total_views, views_this_week) =
        PageViewRepo::totals(&state.pool, SUMMARY_WINDOW_DAYS).await?;
    let top_pages = PageViewRepo::top_paths(&state.pool, TOP_PAGES_LIMIT).await?;
    Ok(Json(DataResponse {
        data: PageViewSummary {
            total_views,
            views_this_week,
            top_pages,
        },
    }))
}

/// GET /api/v1/analytics/pageviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let view = PageViewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("PageView", id))?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/analytics/pageviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PageViewRepo::delete(&state.pool, id).await? {
        tracing::info!(page_view_id = id, deleted_by = user.user_id, "Page view deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("PageView", id))
    }
}

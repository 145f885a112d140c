//! Handlers for the `/cms/widgets` resource.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::cms::VALID_WIDGET_TYPES;
use bns_core::error::CoreError;
use bns_core::types::DbId;
use bns_db::models::widget::{CreateWidget, UpdateWidget, Widget, WidgetQuery};
use bns_db::repositories::WidgetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::{PaginationParams, TypeParam};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// POST /api/v1/cms/widgets
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateWidget>,
) -> AppResult<(StatusCode, Json<DataResponse<Widget>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("name is required".into())));
    }
    validate_choice("widget_type", &input.widget_type, VALID_WIDGET_TYPES)?;
    let widget = WidgetRepo::create(&state.pool, &input).await?;
    tracing::info!(
        widget_id = widget.id,
        widget_type = %widget.widget_type,
        created_by = user.user_id,
        "Widget created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: widget })))
}

/// GET /api/v1/cms/widgets
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<WidgetQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<Widget>>>> {
    validate_optional_choice("type", filter.widget_type.as_deref(), VALID_WIDGET_TYPES)?;
    let widgets =
        WidgetRepo::list(&state.pool, &filter, false, page.limit(), page.offset()).await?;
    let count = WidgetRepo::count(&state.pool, &filter, false).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, widgets),
    }))
}

/// GET /api/v1/cms/widgets/active
pub async fn active(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Widget>>>> {
    let widgets = WidgetRepo::all(&state.pool, None, true).await?;
    Ok(Json(DataResponse { data: widgets }))
}

/// GET /api/v1/cms/widgets/by-type?type=
///
/// Active widgets of one type.
pub async fn by_type(
    State(state): State<AppState>,
    Query(params): Query<TypeParam>,
) -> AppResult<Json<DataResponse<Vec<Widget>>>> {
    let widget_type = params
        .kind
        .ok_or_else(|| AppError::BadRequest("type required".into()))?;
    validate_choice("type", &widget_type, VALID_WIDGET_TYPES)?;
    let widgets = WidgetRepo::all(&state.pool, Some(&widget_type), true).await?;
    Ok(Json(DataResponse { data: widgets }))
}

/// GET /api/v1/cms/widgets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Widget>>> {
    let widget = WidgetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Widget", id))?;
    Ok(Json(DataResponse { data: widget }))
}

/// PUT /api/v1/cms/widgets/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWidget>,
) -> AppResult<Json<DataResponse<Widget>>> {
    validate_optional_choice("widget_type", input.widget_type.as_deref(), VALID_WIDGET_TYPES)?;
    let widget = WidgetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Widget", id))?;
    tracing::info!(widget_id = id, updated_by = user.user_id, "Widget updated");
    Ok(Json(DataResponse { data: widget }))
}

/// DELETE /api/v1/cms/widgets/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if WidgetRepo::delete(&state.pool, id).await? {
        tracing::info!(widget_id = id, deleted_by = user.user_id, "Widget deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Widget", id))
    }
}

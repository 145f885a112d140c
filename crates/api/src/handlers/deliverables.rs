//! Handlers for the `/sponsors/deliverables` resource (staff only).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::sponsors::{
    completion_percentage, is_overdue, status_after_progress, validate_progress,
    VALID_DELIVERABLE_STATUSES, VALID_DELIVERABLE_TYPES,
};
use bns_core::types::{Date, DbId};
use bns_db::models::deliverable::{
    CreateDeliverable, Deliverable, DeliverableLinks, DeliverableProgress, DeliverableQuery,
    UpdateDeliverable,
};
use bns_db::repositories::DeliverableRepo;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A deliverable with its progress figures as of today.
#[derive(Debug, Serialize)]
pub struct DeliverableView {
    #[serde(flatten)]
    pub deliverable: Deliverable,
    pub completion_percentage: f64,
    pub is_overdue: bool,
}

impl DeliverableView {
    fn new(deliverable: Deliverable, today: Date) -> Self {
        Self {
            completion_percentage: completion_percentage(
                deliverable.quantity_delivered,
                deliverable.quantity_required,
            ),
            is_overdue: is_overdue(&deliverable.status, deliverable.due_date, today),
            deliverable,
        }
    }
}

/// Deliverable detail including linked content ids.
#[derive(Debug, Serialize)]
pub struct DeliverableDetail {
    #[serde(flatten)]
    pub view: DeliverableView,
    #[serde(flatten)]
    pub links: DeliverableLinks,
}

fn today() -> Date {
    Utc::now().date_naive()
}

/// POST /api/v1/sponsors/deliverables
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateDeliverable>,
) -> AppResult<(StatusCode, Json<DataResponse<DeliverableView>>)> {
    validate_choice("deliverable_type", &input.deliverable_type, VALID_DELIVERABLE_TYPES)?;
    if input.quantity_required.is_some_and(|q| q < 0) {
        return Err(AppError::BadRequest("quantity_required cannot be negative".into()));
    }
    let deliverable = DeliverableRepo::create(&state.pool, &input).await?;
    tracing::info!(
        deliverable_id = deliverable.id,
        sponsor_id = deliverable.sponsor_id,
        created_by = user.user_id,
        "Deliverable created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DeliverableView::new(deliverable, today()),
        }),
    ))
}

/// GET /api/v1/sponsors/deliverables
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<DeliverableQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<DeliverableView>>>> {
    validate_optional_choice("status", filter.status.as_deref(), VALID_DELIVERABLE_STATUSES)?;
    let today = today();
    let deliverables =
        DeliverableRepo::list(&state.pool, &filter, today, page.limit(), page.offset()).await?;
    let count = DeliverableRepo::count(&state.pool, &filter, today).await?;
    let results = deliverables
        .into_iter()
        .map(|d| DeliverableView::new(d, today))
        .collect();
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, results),
    }))
}

/// GET /api/v1/sponsors/deliverables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeliverableDetail>>> {
    let deliverable = DeliverableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Deliverable", id))?;
    let links = DeliverableRepo::links(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: DeliverableDetail {
            view: DeliverableView::new(deliverable, today()),
            links,
        },
    }))
}

/// PUT /api/v1/sponsors/deliverables/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeliverable>,
) -> AppResult<Json<DataResponse<DeliverableView>>> {
    validate_optional_choice(
        "deliverable_type",
        input.deliverable_type.as_deref(),
        VALID_DELIVERABLE_TYPES,
    )?;
    validate_optional_choice("status", input.status.as_deref(), VALID_DELIVERABLE_STATUSES)?;
    let deliverable = DeliverableRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Deliverable", id))?;
    tracing::info!(deliverable_id = id, updated_by = user.user_id, "Deliverable updated");
    Ok(Json(DataResponse {
        data: DeliverableView::new(deliverable, today()),
    }))
}

/// DELETE /api/v1/sponsors/deliverables/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DeliverableRepo::delete(&state.pool, id).await? {
        tracing::info!(deliverable_id = id, deleted_by = user.user_id, "Deliverable deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Deliverable", id))
    }
}

/// POST /api/v1/sponsors/deliverables/{id}/progress
///
/// Adds delivered units; reaching the required quantity completes the
/// deliverable and stamps today's date.
pub async fn progress(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<DeliverableProgress>,
) -> AppResult<Json<DataResponse<DeliverableView>>> {
    let today = today();
    let mut tx = state.pool.begin().await?;
    let current = DeliverableRepo::lock(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Deliverable", id))?;
    validate_progress(&current.status, input.quantity)?;

    let delivered = current.quantity_delivered.saturating_add(input.quantity);
    let status = status_after_progress(&current.status, delivered, current.quantity_required);
    let deliverable = DeliverableRepo::save_progress(&mut *tx, id, delivered, status, today).await?;
    tx.commit().await?;

    tracing::info!(
        deliverable_id = id,
        quantity_delivered = delivered,
        status = %deliverable.status,
        recorded_by = user.user_id,
        "Deliverable progress recorded"
    );
    Ok(Json(DataResponse {
        data: DeliverableView::new(deliverable, today),
    }))
}

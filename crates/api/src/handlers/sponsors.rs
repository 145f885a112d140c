//! Handlers for the `/accounts/sponsors` resource (sponsor profiles).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::error::CoreError;
use bns_core::sponsors::{content_pieces_remaining, month_start, VALID_SPONSOR_LEVELS};
use bns_core::types::DbId;
use bns_db::models::sponsor_profile::{
    CreateSponsorProfile, SponsorProfile, SponsorQuery, UpdateSponsorProfile,
};
use bns_db::repositories::SponsorProfileRepo;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Response of `GET /accounts/sponsors/{id}/deliverables`.
#[derive(Debug, Serialize)]
pub struct DeliverablesSummary {
    pub sponsor_id: DbId,
    pub company_name: String,
    pub content_pieces_remaining: i64,
    pub events_sponsored: i32,
    pub brand_visibility_slots: i32,
    pub brand_mentions_this_month: i64,
    pub open_deliverables: i64,
    pub overdue_deliverables: i64,
}

/// POST /api/v1/accounts/sponsors
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateSponsorProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<SponsorProfile>>)> {
    validate_optional_choice("level", input.level.as_deref(), VALID_SPONSOR_LEVELS)?;
    if input.company_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "company_name is required".into(),
        )));
    }
    let sponsor = SponsorProfileRepo::create(&state.pool, &input).await?;
    tracing::info!(
        sponsor_id = sponsor.id,
        company = %sponsor.company_name,
        created_by = user.user_id,
        "Sponsor profile created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: sponsor })))
}

/// GET /api/v1/accounts/sponsors
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<SponsorQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<SponsorProfile>>>> {
    validate_optional_choice("level", filter.level.as_deref(), VALID_SPONSOR_LEVELS)?;
    let sponsors =
        SponsorProfileRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = SponsorProfileRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, sponsors),
    }))
}

/// GET /api/v1/accounts/sponsors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SponsorProfile>>> {
    let sponsor = find(&state, id).await?;
    Ok(Json(DataResponse { data: sponsor }))
}

/// PUT /api/v1/accounts/sponsors/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSponsorProfile>,
) -> AppResult<Json<DataResponse<SponsorProfile>>> {
    validate_optional_choice("level", input.level.as_deref(), VALID_SPONSOR_LEVELS)?;
    let sponsor = SponsorProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("SponsorProfile", id))?;
    tracing::info!(sponsor_id = id, updated_by = user.user_id, "Sponsor profile updated");
    Ok(Json(DataResponse { data: sponsor }))
}

/// DELETE /api/v1/accounts/sponsors/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SponsorProfileRepo::delete(&state.pool, id).await? {
        tracing::info!(sponsor_id = id, deleted_by = user.user_id, "Sponsor profile deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("SponsorProfile", id))
    }
}

/// GET /api/v1/accounts/sponsors/{id}/deliverables
///
/// Contract usage for one sponsor. Visible to staff and to the sponsor.
pub async fn deliverables(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeliverablesSummary>>> {
    let sponsor = find(&state, id).await?;
    if sponsor.user_id != auth_user.user_id && !auth_user.is_staff() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only view your own sponsorship".into(),
        )));
    }

    let today = Utc::now().date_naive();
    let counts =
        SponsorProfileRepo::deliverable_counts(&state.pool, id, month_start(today), today).await?;

    Ok(Json(DataResponse {
        data: DeliverablesSummary {
            sponsor_id: sponsor.id,
            company_name: sponsor.company_name,
            content_pieces_remaining: content_pieces_remaining(
                sponsor.dedicated_content_pieces,
                counts.dedicated_content_delivered,
            ),
            events_sponsored: sponsor.event_sponsorships,
            brand_visibility_slots: sponsor.brand_visibility_slots,
            brand_mentions_this_month: counts.brand_mentions_this_month,
            open_deliverables: counts.open_deliverables,
            overdue_deliverables: counts.overdue_deliverables,
        },
    }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<SponsorProfile> {
    SponsorProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("SponsorProfile", id))
}

//! Handlers for the `/sponsors/assets` resource (staff only).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::error::CoreError;
use bns_core::sponsors::VALID_ASSET_TYPES;
use bns_core::types::DbId;
use bns_db::models::sponsor_asset::{CreateSponsorAsset, SponsorAsset, UpdateSponsorAsset};
use bns_db::repositories::SponsorAssetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::{PaginationParams, SponsorIdParam};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// POST /api/v1/sponsors/assets
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateSponsorAsset>,
) -> AppResult<(StatusCode, Json<DataResponse<SponsorAsset>>)> {
    if input.name.trim().is_empty() || input.file_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name and file_url are required".into(),
        )));
    }
    validate_optional_choice("asset_type", input.asset_type.as_deref(), VALID_ASSET_TYPES)?;
    let asset = SponsorAssetRepo::create(&state.pool, &input).await?;
    tracing::info!(
        asset_id = asset.id,
        sponsor_id = asset.sponsor_id,
        created_by = user.user_id,
        "Sponsor asset created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// GET /api/v1/sponsors/assets
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<SponsorIdParam>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<SponsorAsset>>>> {
    let assets =
        SponsorAssetRepo::list(&state.pool, filter.sponsor_id, page.limit(), page.offset())
            .await?;
    let count = SponsorAssetRepo::count(&state.pool, filter.sponsor_id).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, assets),
    }))
}

/// GET /api/v1/sponsors/assets/by-sponsor?sponsor_id=
pub async fn by_sponsor(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Query(params): Query<SponsorIdParam>,
) -> AppResult<Json<DataResponse<Vec<SponsorAsset>>>> {
    let sponsor_id = params
        .sponsor_id
        .ok_or_else(|| AppError::BadRequest("sponsor_id required".into()))?;
    let assets = SponsorAssetRepo::by_sponsor(&state.pool, sponsor_id).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/sponsors/assets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SponsorAsset>>> {
    let asset = SponsorAssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("SponsorAsset", id))?;
    Ok(Json(DataResponse { data: asset }))
}

/// PUT /api/v1/sponsors/assets/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSponsorAsset>,
) -> AppResult<Json<DataResponse<SponsorAsset>>> {
    validate_optional_choice("asset_type", input.asset_type.as_deref(), VALID_ASSET_TYPES)?;
    let asset = SponsorAssetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("SponsorAsset", id))?;
    tracing::info!(asset_id = id, updated_by = user.user_id, "Sponsor asset updated");
    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /api/v1/sponsors/assets/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SponsorAssetRepo::delete(&state.pool, id).await? {
        tracing::info!(asset_id = id, deleted_by = user.user_id, "Sponsor asset deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("SponsorAsset", id))
    }
}

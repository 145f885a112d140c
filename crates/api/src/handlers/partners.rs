//! Handlers for the `/accounts/partners` resource (consortium partners).
//!
//! Anonymous callers see active partners only; staff see all of them.
//! Partners are addressed by slug.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::error::CoreError;
use bns_core::slug::validate_slug;
use bns_db::models::partner::{ConsortiumPartner, CreatePartner, UpdatePartner};
use bns_db::repositories::PartnerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// POST /api/v1/accounts/partners
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreatePartner>,
) -> AppResult<(StatusCode, Json<DataResponse<ConsortiumPartner>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("name is required".into())));
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let partner = PartnerRepo::create(&state.pool, &input).await?;
    tracing::info!(
        partner_id = partner.id,
        slug = %partner.slug,
        created_by = admin.user_id,
        "Partner created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: partner })))
}

/// GET /api/v1/accounts/partners
pub async fn list(
    State(state): State<AppState>,
    auth: MaybeAuth,
    OriginalUri(uri): OriginalUri,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<ConsortiumPartner>>>> {
    let active_only = !auth.is_staff();
    let partners = PartnerRepo::list(&state.pool, active_only, page.limit(), page.offset()).await?;
    let count = PartnerRepo::count(&state.pool, active_only).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, partners),
    }))
}

/// GET /api/v1/accounts/partners/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ConsortiumPartner>>> {
    let partner = PartnerRepo::find_by_slug(&state.pool, &slug, !auth.is_staff())
        .await?
        .ok_or_else(|| AppError::not_found_key("ConsortiumPartner", slug))?;
    Ok(Json(DataResponse { data: partner }))
}

/// PUT /api/v1/accounts/partners/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
    Json(input): Json<UpdatePartner>,
) -> AppResult<Json<DataResponse<ConsortiumPartner>>> {
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }
    let partner = PartnerRepo::update(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| AppError::not_found_key("ConsortiumPartner", slug))?;
    tracing::info!(partner_id = partner.id, updated_by = admin.user_id, "Partner updated");
    Ok(Json(DataResponse { data: partner }))
}

/// DELETE /api/v1/accounts/partners/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if PartnerRepo::delete(&state.pool, &slug).await? {
        tracing::info!(slug = %slug, deleted_by = admin.user_id, "Partner deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found_key("ConsortiumPartner", slug))
    }
}

//! Handlers for the `/accounts/organization` singleton.
//!
//! Admins read and patch the full profile; the projections are public and
//! answer 404 until a profile row exists.

use axum::extract::State;
use axum::Json;
use bns_db::models::organization::{
    BrandIdentity, ContactInfo, ImpactStatistics, OrganizationProfile, PublicProfile,
    UpdateOrganizationProfile,
};
use bns_db::repositories::OrganizationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/accounts/organization
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<DataResponse<OrganizationProfile>>> {
    let profile = load(&state).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/accounts/organization
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<UpdateOrganizationProfile>,
) -> AppResult<Json<DataResponse<OrganizationProfile>>> {
    let profile = OrganizationRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(no_profile)?;
    tracing::info!(updated_by = admin.user_id, "Organization profile updated");
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/accounts/organization/public
pub async fn public(State(state): State<AppState>) -> AppResult<Json<DataResponse<PublicProfile>>> {
    let profile = load(&state).await?;
    Ok(Json(DataResponse { data: profile.public() }))
}

/// GET /api/v1/accounts/organization/impact
pub async fn impact(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ImpactStatistics>>> {
    let profile = load(&state).await?;
    Ok(Json(DataResponse { data: profile.impact() }))
}

/// GET /api/v1/accounts/organization/brand
pub async fn brand(State(state): State<AppState>) -> AppResult<Json<DataResponse<BrandIdentity>>> {
    let profile = load(&state).await?;
    Ok(Json(DataResponse { data: profile.brand() }))
}

/// GET /api/v1/accounts/organization/contact
pub async fn contact(State(state): State<AppState>) -> AppResult<Json<DataResponse<ContactInfo>>> {
    let profile = load(&state).await?;
    Ok(Json(DataResponse { data: profile.contact() }))
}

async fn load(state: &AppState) -> AppResult<OrganizationProfile> {
    OrganizationRepo::get(&state.pool).await?.ok_or_else(no_profile)
}

fn no_profile() -> AppError {
    AppError::not_found_key("OrganizationProfile", "profile")
}

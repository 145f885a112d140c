//! Handlers for the `/accounts/donors` resource.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::error::CoreError;
use bns_core::sponsors::{VALID_DONOR_TYPES, VALID_PAYMENT_METHODS};
use bns_core::types::{DbId, Money};
use bns_db::models::donor_profile::{
    CreateDonorProfile, DonorProfile, DonorQuery, UpdateDonorProfile,
};
use bns_db::repositories::DonorProfileRepo;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Request body for `POST /accounts/donors/{id}/record-donation`.
#[derive(Debug, Deserialize)]
pub struct RecordDonation {
    pub amount: Option<Money>,
}

/// Response of the record-donation action.
#[derive(Debug, Serialize)]
pub struct DonationRecorded {
    pub status: &'static str,
    pub total_donated: Money,
    pub donation_count: i32,
}

/// POST /api/v1/accounts/donors
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateDonorProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<DonorProfile>>)> {
    validate_optional_choice("donor_type", input.donor_type.as_deref(), VALID_DONOR_TYPES)?;
    validate_optional_choice(
        "preferred_payment_method",
        input.preferred_payment_method.as_deref(),
        VALID_PAYMENT_METHODS,
    )?;
    let profile = DonorProfileRepo::create(&state.pool, &input).await?;
    tracing::info!(
        donor_id = profile.id,
        user_id = profile.user_id,
        created_by = user.user_id,
        "Donor profile created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// GET /api/v1/accounts/donors
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<DonorQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<DonorProfile>>>> {
    validate_optional_choice("donor_type", filter.donor_type.as_deref(), VALID_DONOR_TYPES)?;
    let donors = DonorProfileRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = DonorProfileRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, donors),
    }))
}

/// GET /api/v1/accounts/donors/{id}
///
/// Staff may read any profile; a donor may read their own.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DonorProfile>>> {
    let profile = DonorProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("DonorProfile", id))?;
    if profile.user_id != auth_user.user_id && !auth_user.is_staff() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only view your own donor profile".into(),
        )));
    }
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/accounts/donors/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDonorProfile>,
) -> AppResult<Json<DataResponse<DonorProfile>>> {
    validate_optional_choice("donor_type", input.donor_type.as_deref(), VALID_DONOR_TYPES)?;
    validate_optional_choice(
        "preferred_payment_method",
        input.preferred_payment_method.as_deref(),
        VALID_PAYMENT_METHODS,
    )?;
    let profile = DonorProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("DonorProfile", id))?;
    tracing::info!(donor_id = id, updated_by = user.user_id, "Donor profile updated");
    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/accounts/donors/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DonorProfileRepo::delete(&state.pool, id).await? {
        tracing::info!(donor_id = id, deleted_by = user.user_id, "Donor profile deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("DonorProfile", id))
    }
}

/// POST /api/v1/accounts/donors/{id}/record-donation
///
/// Folds one donation into the profile's running totals. The profile row is
/// locked for the read-modify-write.
pub async fn record_donation(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<RecordDonation>,
) -> AppResult<Json<DataResponse<DonationRecorded>>> {
    let amount = input
        .amount
        .ok_or_else(|| AppError::BadRequest("Amount required".into()))?;

    let mut tx = state.pool.begin().await?;
    let totals = DonorProfileRepo::lock_totals(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("DonorProfile", id))?;
    let updated = totals.record(amount, Utc::now().date_naive())?;
    DonorProfileRepo::save_totals(&mut *tx, id, &updated).await?;
    tx.commit().await?;

    tracing::info!(
        donor_id = id,
        amount = %amount,
        donation_count = updated.donation_count,
        recorded_by = user.user_id,
        "Donation recorded"
    );
    Ok(Json(DataResponse {
        data: DonationRecorded {
            status: "donation recorded",
            total_donated: updated.total_donated,
            donation_count: updated.donation_count,
        },
    }))
}

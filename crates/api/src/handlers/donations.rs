//! Handlers for the `/sponsors/donations` resource (staff only).
//!
//! Donations are created pending and move through the `status` action.
//! Completing a donation issues its receipt number and folds the amount into
//! the donor profile's totals in the same transaction.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::sponsors::{
    ensure_donation_transition, receipt_number, validate_amount, validate_recurrence,
    DEFAULT_CURRENCY, DONATION_COMPLETED, VALID_DONATION_STATUSES, VALID_PAYMENT_METHODS,
};
use bns_core::types::{DbId, Money};
use bns_db::models::donation::{
    CreateDonation, Donation, DonationQuery, DonationStatusChange, UpdateDonation,
};
use bns_db::repositories::{DonationRepo, DonorProfileRepo};
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Response of `GET /sponsors/donations/statistics`.
#[derive(Debug, Serialize)]
pub struct DonationStatisticsResponse {
    pub total_raised: Money,
    pub donation_count: i64,
    pub currency: &'static str,
}

/// POST /api/v1/sponsors/donations
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateDonation>,
) -> AppResult<(StatusCode, Json<DataResponse<Donation>>)> {
    validate_amount(input.amount)?;
    validate_choice("payment_method", &input.payment_method, VALID_PAYMENT_METHODS)?;
    validate_recurrence(input.is_recurring, input.recurring_frequency.as_deref())?;

    let donation = DonationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        donation_id = donation.id,
        donor_id = donation.donor_id,
        amount = %donation.amount,
        created_by = user.user_id,
        "Donation created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: donation })))
}

/// GET /api/v1/sponsors/donations
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<DonationQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<Donation>>>> {
    validate_optional_choice("status", filter.status.as_deref(), VALID_DONATION_STATUSES)?;
    validate_optional_choice(
        "payment_method",
        filter.payment_method.as_deref(),
        VALID_PAYMENT_METHODS,
    )?;
    let donations = DonationRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = DonationRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, donations),
    }))
}

/// GET /api/v1/sponsors/donations/statistics
pub async fn statistics(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
) -> AppResult<Json<DataResponse<DonationStatisticsResponse>>> {
    let stats = DonationRepo::statistics(&state.pool).await?;
    Ok(Json(DataResponse {
        data: DonationStatisticsResponse {
            total_raised: stats.total_raised,
            donation_count: stats.donation_count,
            currency: DEFAULT_CURRENCY,
        },
    }))
}

/// GET /api/v1/sponsors/donations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Donation>>> {
    let donation = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Donation", id))?;
    Ok(Json(DataResponse { data: donation }))
}

/// PUT /api/v1/sponsors/donations/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDonation>,
) -> AppResult<Json<DataResponse<Donation>>> {
    let donation = DonationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Donation", id))?;
    tracing::info!(donation_id = id, updated_by = user.user_id, "Donation updated");
    Ok(Json(DataResponse { data: donation }))
}

/// DELETE /api/v1/sponsors/donations/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DonationRepo::delete(&state.pool, id).await? {
        tracing::info!(donation_id = id, deleted_by = user.user_id, "Donation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Donation", id))
    }
}

/// POST /api/v1/sponsors/donations/{id}/status
///
/// Allowed moves: pending to completed or failed, completed to refunded.
pub async fn change_status(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<DonationStatusChange>,
) -> AppResult<Json<DataResponse<Donation>>> {
    validate_choice("status", &input.status, VALID_DONATION_STATUSES)?;
    let today = Utc::now().date_naive();

    let mut tx = state.pool.begin().await?;
    let current = DonationRepo::lock(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Donation", id))?;
    ensure_donation_transition(&current.status, &input.status)?;

    let completing = input.status == DONATION_COMPLETED;
    let receipt = completing.then(|| receipt_number(id, today));
    let donation = DonationRepo::set_status(&mut *tx, id, &input.status, receipt.as_deref()).await?;

    if completing {
        let totals = DonorProfileRepo::lock_totals(&mut *tx, donation.donor_id)
            .await?
            .ok_or(AppError::not_found("DonorProfile", donation.donor_id))?;
        let updated = totals.record(donation.amount, today)?;
        DonorProfileRepo::save_totals(&mut *tx, donation.donor_id, &updated).await?;
    }
    tx.commit().await?;

    tracing::info!(
        donation_id = id,
        from = %current.status,
        to = %donation.status,
        changed_by = user.user_id,
        "Donation status changed"
    );
    Ok(Json(DataResponse { data: donation }))
}

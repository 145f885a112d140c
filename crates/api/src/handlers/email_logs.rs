//! Handlers for the `/newsletter/email-logs` resource.
//!
//! Listing and recording sends is staff only. The `opened` and `clicked`
//! tracking actions are public: they are hit from tracking pixels and
//! redirect links inside delivered emails.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::newsletter::email_log_status;
use bns_core::types::DbId;
use bns_db::models::email_log::{EmailLog, EmailLogQuery, RecordSend, TrackClick};
use bns_db::repositories::EmailLogRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// An email log with its derived delivery status.
#[derive(Debug, Serialize)]
pub struct EmailLogView {
    #[serde(flatten)]
    pub log: EmailLog,
    pub status: &'static str,
}

impl From<EmailLog> for EmailLogView {
    fn from(log: EmailLog) -> Self {
        let status = email_log_status(&log.milestones());
        Self { log, status }
    }
}

/// POST /api/v1/newsletter/email-logs
pub async fn record_send(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<RecordSend>,
) -> AppResult<(StatusCode, Json<DataResponse<EmailLogView>>)> {
    let log = EmailLogRepo::record_send(&state.pool, &input).await?;
    tracing::info!(
        email_log_id = log.id,
        campaign_id = log.campaign_id,
        subscriber_id = log.subscriber_id,
        "Email send recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: log.into() })))
}

/// GET /api/v1/newsletter/email-logs
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<EmailLogQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<EmailLogView>>>> {
    let logs = EmailLogRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = EmailLogRepo::count(&state.pool, &filter).await?;
    let results = logs.into_iter().map(EmailLogView::from).collect();
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, results),
    }))
}

/// GET /api/v1/newsletter/email-logs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EmailLogView>>> {
    let log = EmailLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("EmailLog", id))?;
    Ok(Json(DataResponse { data: log.into() }))
}

/// POST /api/v1/newsletter/email-logs/{id}/opened
pub async fn opened(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EmailLogView>>> {
    let log = EmailLogRepo::track_open(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("EmailLog", id))?;
    tracing::debug!(email_log_id = id, "Email open tracked");
    Ok(Json(DataResponse { data: log.into() }))
}

/// POST /api/v1/newsletter/email-logs/{id}/clicked
pub async fn clicked(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TrackClick>,
) -> AppResult<Json<DataResponse<EmailLogView>>> {
    if input.url.trim().is_empty() {
        return Err(AppError::BadRequest("url is required".into()));
    }
    let log = EmailLogRepo::track_click(&state.pool, id, input.url.trim())
        .await?
        .ok_or(AppError::not_found("EmailLog", id))?;
    tracing::debug!(email_log_id = id, "Email click tracked");
    Ok(Json(DataResponse { data: log.into() }))
}

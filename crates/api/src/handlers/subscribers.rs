//! Handlers for the `/newsletter/subscribers` resource.
//!
//! Subscribe, confirm and unsubscribe are public and implement double
//! opt-in; list, retrieve, update and delete are staff only. No email is
//! sent from here: the confirmation token is handed to the mail pipeline.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::newsletter::{
    ensure_can_confirm, ensure_staff_status_change, normalize_email, percentage, subscribe_action,
    unsubscribe_changes_record, SubscribeAction, DEFAULT_CONTENT_PREFERENCE,
    VALID_CONTENT_PREFERENCES, VALID_SUBSCRIBER_STATUSES,
};
use bns_core::search::ilike_pattern;
use bns_core::types::DbId;
use bns_db::models::subscriber::{
    CreateSubscriber, SubscribeRequest, Subscriber, SubscriberQuery, UpdateSubscriber,
};
use bns_db::repositories::SubscriberRepo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, MessageResponse, Page};
use crate::state::AppState;

const DEFAULT_SOURCE: &str = "website";

/// Body of `POST /newsletter/subscribers/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub token: Option<String>,
}

/// Body of `POST /newsletter/subscribers/unsubscribe`.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub token: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub reason: String,
}

/// Staff view of a subscriber with engagement rates over emails sent.
#[derive(Debug, Serialize)]
pub struct SubscriberView {
    #[serde(flatten)]
    pub subscriber: Subscriber,
    pub open_rate: f64,
    pub click_rate: f64,
}

impl From<Subscriber> for SubscriberView {
    fn from(subscriber: Subscriber) -> Self {
        let sent = i64::from(subscriber.emails_sent);
        Self {
            open_rate: percentage(i64::from(subscriber.emails_opened), sent),
            click_rate: percentage(i64::from(subscriber.emails_clicked), sent),
            subscriber,
        }
    }
}

/// POST /api/v1/newsletter/subscribers
pub async fn subscribe(
    State(state): State<AppState>,
    client: ClientMeta,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MessageResponse>>)> {
    let email = normalize_email(&input.email)?;
    validate_optional_choice(
        "content_preference",
        input.content_preference.as_deref(),
        VALID_CONTENT_PREFERENCES,
    )?;

    let existing = SubscriberRepo::find_by_email(&state.pool, &email).await?;
    match subscribe_action(existing.as_ref().map(|s| s.status.as_str()))? {
        SubscribeAction::ResendConfirmation => Ok((
            StatusCode::OK,
            Json(MessageResponse::new("Confirmation email resent")),
        )),
        SubscribeAction::Resubscribe => {
            let Some(existing) = existing else {
                return Err(AppError::InternalError("resubscribe without a record".into()));
            };
            let token = Uuid::new_v4().to_string();
            let subscriber = SubscriberRepo::resubscribe(&state.pool, existing.id, &token).await?;
            tracing::info!(subscriber_id = subscriber.id, "Subscriber resubscribed");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("Please check your email to confirm subscription")),
            ))
        }
        SubscribeAction::Create => {
            let create = CreateSubscriber {
                email,
                first_name: input.first_name.unwrap_or_default(),
                last_name: input.last_name.unwrap_or_default(),
                content_preference: input
                    .content_preference
                    .unwrap_or_else(|| DEFAULT_CONTENT_PREFERENCE.to_string()),
                source: input.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
                ip_address: client.ip_address,
                user_agent: client.user_agent.unwrap_or_default(),
                confirmation_token: Uuid::new_v4().to_string(),
            };
            let subscriber =
                SubscriberRepo::create(&state.pool, &create, &input.category_ids).await?;
            tracing::info!(
                subscriber_id = subscriber.id,
                source = %subscriber.source,
                "Subscriber created"
            );
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("Please check your email to confirm subscription")),
            ))
        }
    }
}

/// POST /api/v1/newsletter/subscribers/confirm
pub async fn confirm(
    State(state): State<AppState>,
    Json(input): Json<ConfirmRequest>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let token = input
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Token required".into()))?;
    let subscriber = SubscriberRepo::find_by_token(&state.pool, &token)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid token".into()))?;
    ensure_can_confirm(&subscriber.status)?;

    let subscriber = SubscriberRepo::confirm(&state.pool, subscriber.id).await?;
    tracing::info!(subscriber_id = subscriber.id, "Subscription confirmed");
    Ok(Json(MessageResponse::new("Subscription confirmed!")))
}

/// POST /api/v1/newsletter/subscribers/unsubscribe
///
/// Looks the subscriber up by token first, then by email.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeRequest>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let mut subscriber = None;
    if let Some(token) = input.token.as_deref().filter(|t| !t.is_empty()) {
        subscriber = SubscriberRepo::find_by_token(&state.pool, token).await?;
    }
    if subscriber.is_none() {
        if let Some(email) = input.email.as_deref() {
            let email = email.trim().to_lowercase();
            subscriber = SubscriberRepo::find_by_email(&state.pool, &email).await?;
        }
    }
    let subscriber =
        subscriber.ok_or_else(|| AppError::not_found_key("Subscriber", "token or email"))?;

    if unsubscribe_changes_record(&subscriber.status) {
        SubscriberRepo::unsubscribe(&state.pool, subscriber.id, input.reason.trim()).await?;
        tracing::info!(subscriber_id = subscriber.id, "Subscriber unsubscribed");
    }
    Ok(Json(MessageResponse::new("Unsubscribed successfully")))
}

/// GET /api/v1/newsletter/subscribers
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<SubscriberQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<SubscriberView>>>> {
    validate_optional_choice("status", filter.status.as_deref(), VALID_SUBSCRIBER_STATUSES)?;
    let search = ilike_pattern(filter.search.as_deref());
    let subscribers = SubscriberRepo::list(
        &state.pool,
        &filter,
        search.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = SubscriberRepo::count(&state.pool, &filter, search.as_deref()).await?;
    let results = subscribers.into_iter().map(SubscriberView::from).collect();
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, results),
    }))
}

/// GET /api/v1/newsletter/subscribers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SubscriberView>>> {
    let subscriber = SubscriberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Subscriber", id))?;
    Ok(Json(DataResponse {
        data: subscriber.into(),
    }))
}

/// PUT /api/v1/newsletter/subscribers/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubscriber>,
) -> AppResult<Json<DataResponse<SubscriberView>>> {
    validate_optional_choice("status", input.status.as_deref(), VALID_SUBSCRIBER_STATUSES)?;
    validate_optional_choice(
        "content_preference",
        input.content_preference.as_deref(),
        VALID_CONTENT_PREFERENCES,
    )?;
    if let Some(status) = input.status.as_deref() {
        let current = SubscriberRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::not_found("Subscriber", id))?;
        ensure_staff_status_change(&current.status, status)?;
    }
    let subscriber = SubscriberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Subscriber", id))?;
    tracing::info!(subscriber_id = id, updated_by = user.user_id, "Subscriber updated");
    Ok(Json(DataResponse {
        data: subscriber.into(),
    }))
}

/// DELETE /api/v1/newsletter/subscribers/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SubscriberRepo::delete(&state.pool, id).await? {
        tracing::info!(subscriber_id = id, deleted_by = user.user_id, "Subscriber deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Subscriber", id))
    }
}

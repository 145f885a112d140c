//! Handlers for the `/newsletter/campaigns` resource (staff only).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::error::CoreError;
use bns_core::newsletter::{
    ensure_can_mark_sent, ensure_can_send, percentage, VALID_CAMPAIGN_STATUSES,
    VALID_CAMPAIGN_TYPES,
};
use bns_core::types::DbId;
use bns_db::models::blog_post::PostSummary;
use bns_db::models::campaign::{Campaign, CampaignQuery, CreateCampaign, UpdateCampaign};
use bns_db::models::category::CategorySummary;
use bns_db::repositories::CampaignRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A campaign with its engagement rates.
///
/// Open and click rates are over delivered emails; click-to-open is over
/// opens.
#[derive(Debug, Serialize)]
pub struct CampaignView {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub open_rate: f64,
    pub click_rate: f64,
    pub click_to_open_rate: f64,
}

impl From<Campaign> for CampaignView {
    fn from(campaign: Campaign) -> Self {
        let delivered = i64::from(campaign.delivered_count);
        let opens = i64::from(campaign.open_count);
        let clicks = i64::from(campaign.click_count);
        Self {
            open_rate: percentage(opens, delivered),
            click_rate: percentage(clicks, delivered),
            click_to_open_rate: percentage(clicks, opens),
            campaign,
        }
    }
}

/// Campaign detail with its linked posts and target categories.
#[derive(Debug, Serialize)]
pub struct CampaignDetail {
    #[serde(flatten)]
    pub view: CampaignView,
    pub featured_posts: Vec<PostSummary>,
    pub target_categories: Vec<CategorySummary>,
}

/// POST /api/v1/newsletter/campaigns
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<DataResponse<CampaignView>>)> {
    if input.name.trim().is_empty() || input.subject.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name and subject are required".into(),
        )));
    }
    validate_choice("campaign_type", &input.campaign_type, VALID_CAMPAIGN_TYPES)?;
    let campaign = CampaignRepo::create(&state.pool, &input).await?;
    tracing::info!(
        campaign_id = campaign.id,
        campaign_type = %campaign.campaign_type,
        created_by = user.user_id,
        "Campaign created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign.into() })))
}

/// GET /api/v1/newsletter/campaigns
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<CampaignQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<CampaignView>>>> {
    validate_optional_choice("status", filter.status.as_deref(), VALID_CAMPAIGN_STATUSES)?;
    validate_optional_choice("type", filter.campaign_type.as_deref(), VALID_CAMPAIGN_TYPES)?;
    let campaigns = CampaignRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = CampaignRepo::count(&state.pool, &filter).await?;
    let results = campaigns.into_iter().map(CampaignView::from).collect();
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, results),
    }))
}

/// GET /api/v1/newsletter/campaigns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CampaignDetail>>> {
    let campaign = find(&state, id).await?;
    let featured_posts = CampaignRepo::featured_posts(&state.pool, id).await?;
    let target_categories = CampaignRepo::target_categories(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: CampaignDetail {
            view: campaign.into(),
            featured_posts,
            target_categories,
        },
    }))
}

/// PUT /api/v1/newsletter/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<Json<DataResponse<CampaignView>>> {
    validate_optional_choice(
        "campaign_type",
        input.campaign_type.as_deref(),
        VALID_CAMPAIGN_TYPES,
    )?;
    let campaign = CampaignRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Campaign", id))?;
    tracing::info!(campaign_id = id, updated_by = user.user_id, "Campaign updated");
    Ok(Json(DataResponse { data: campaign.into() }))
}

/// DELETE /api/v1/newsletter/campaigns/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CampaignRepo::delete(&state.pool, id).await? {
        tracing::info!(campaign_id = id, deleted_by = user.user_id, "Campaign deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Campaign", id))
    }
}

/// POST /api/v1/newsletter/campaigns/{id}/send
///
/// Queues a draft for sending now. Delivery itself happens outside the API.
pub async fn send(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CampaignView>>> {
    let campaign = find(&state, id).await?;
    ensure_can_send(&campaign.status)?;
    let campaign = CampaignRepo::mark_scheduled(&state.pool, id).await?;
    tracing::info!(campaign_id = id, queued_by = user.user_id, "Campaign queued for sending");
    Ok(Json(DataResponse { data: campaign.into() }))
}

/// POST /api/v1/newsletter/campaigns/{id}/mark-sent
pub async fn mark_sent(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CampaignView>>> {
    let campaign = find(&state, id).await?;
    ensure_can_mark_sent(&campaign.status)?;
    let campaign = CampaignRepo::mark_sent(&state.pool, id).await?;
    tracing::info!(campaign_id = id, marked_by = user.user_id, "Campaign marked sent");
    Ok(Json(DataResponse { data: campaign.into() }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Campaign> {
    CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Campaign", id))
}

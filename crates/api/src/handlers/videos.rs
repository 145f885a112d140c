//! Handlers for the `/content/videos` resource.
//!
//! Anonymous callers only ever see published videos whose publish time has
//! passed. Staff see drafts and scheduled videos as well.

use std::collections::BTreeMap;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::content::{
    embed_code, video_thumbnail_url, FEATURED_VIDEO_LIMIT, PER_PLATFORM_LIMIT,
    VALID_PLATFORMS, VALID_VIDEO_CONTENT_TYPES,
};
use bns_core::search::{ilike_pattern, order_clause};
use bns_core::slug::validate_slug;
use bns_core::types::DbId;
use bns_db::models::category::CategorySummary;
use bns_db::models::playlist::PlaylistSummary;
use bns_db::models::sponsor_profile::SponsorSummary;
use bns_db::models::user::UserSummary;
use bns_db::models::video::{CreateVideo, UpdateVideo, Video, VideoQuery};
use bns_db::repositories::video_repo::{DEFAULT_ORDER, ORDERING_FIELDS};
use bns_db::repositories::{CategoryRepo, PlaylistRepo, SponsorProfileRepo, UserRepo, VideoRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A video with its display thumbnail resolved and its embed snippet.
#[derive(Debug, Serialize)]
pub struct VideoCard {
    #[serde(flatten)]
    pub video: Video,
    pub embed_code: String,
}

impl From<Video> for VideoCard {
    fn from(mut video: Video) -> Self {
        video.thumbnail_url = video_thumbnail_url(
            &video.platform,
            &video.external_id,
            Some(video.thumbnail_url.as_str()),
        );
        let embed_code = embed_code(&video.platform, &video.external_id, &video.external_url);
        Self { video, embed_code }
    }
}

/// Full video representation for `GET /content/videos/{id}`.
#[derive(Debug, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub card: VideoCard,
    pub author: Option<UserSummary>,
    pub sponsored_by: Option<SponsorSummary>,
    pub playlist: Option<PlaylistSummary>,
    pub categories: Vec<CategorySummary>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/content/videos
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoCard>>)> {
    validate_choice("platform", &input.platform, VALID_PLATFORMS)?;
    validate_choice("content_type", &input.content_type, VALID_VIDEO_CONTENT_TYPES)?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let video = VideoRepo::create(&state.pool, Some(user.user_id), &input).await?;
    tracing::info!(
        video_id = video.id,
        platform = %video.platform,
        created_by = user.user_id,
        "Video created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: video.into() })))
}

/// GET /api/v1/content/videos
pub async fn list(
    State(state): State<AppState>,
    auth: MaybeAuth,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<VideoQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<VideoCard>>>> {
    validate_optional_choice("platform", filter.platform.as_deref(), VALID_PLATFORMS)?;
    validate_optional_choice(
        "content_type",
        filter.content_type.as_deref(),
        VALID_VIDEO_CONTENT_TYPES,
    )?;
    let public_only = !auth.is_staff();
    let search = ilike_pattern(filter.search.as_deref());
    let order_by = order_clause(filter.ordering.as_deref(), ORDERING_FIELDS, DEFAULT_ORDER);

    let videos = VideoRepo::list(
        &state.pool,
        public_only,
        &filter,
        search.as_deref(),
        &order_by,
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = VideoRepo::count(&state.pool, public_only, &filter, search.as_deref()).await?;
    let results = videos.into_iter().map(VideoCard::from).collect();
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, results),
    }))
}

/// GET /api/v1/content/videos/featured
pub async fn featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VideoCard>>>> {
    let filter = VideoQuery {
        is_featured: Some(true),
        ..Default::default()
    };
    let videos = VideoRepo::list(
        &state.pool,
        true,
        &filter,
        None,
        DEFAULT_ORDER,
        FEATURED_VIDEO_LIMIT,
        0,
    )
    .await?;
    Ok(Json(DataResponse {
        data: videos.into_iter().map(VideoCard::from).collect(),
    }))
}

/// GET /api/v1/content/videos/by-platform
///
/// The latest public videos of every platform, keyed by platform.
pub async fn by_platform(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BTreeMap<&'static str, Vec<VideoCard>>>>> {
    let mut grouped = BTreeMap::new();
    for platform in VALID_PLATFORMS {
        let filter = VideoQuery {
            platform: Some((*platform).to_string()),
            ..Default::default()
        };
        let videos = VideoRepo::list(
            &state.pool,
            true,
            &filter,
            None,
            DEFAULT_ORDER,
            PER_PLATFORM_LIMIT,
            0,
        )
        .await?;
        grouped.insert(*platform, videos.into_iter().map(VideoCard::from).collect());
    }
    Ok(Json(DataResponse { data: grouped }))
}

/// GET /api/v1/content/videos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VideoDetail>>> {
    let video = VideoRepo::find_by_id(&state.pool, id, !auth.is_staff())
        .await?
        .ok_or(AppError::not_found("Video", id))?;

    let author = match video.author_id {
        Some(author_id) => UserRepo::find_summary(&state.pool, author_id).await?,
        None => None,
    };
    let sponsored_by = match video.sponsored_by_id {
        Some(sponsor_id) => SponsorProfileRepo::find_summary(&state.pool, sponsor_id).await?,
        None => None,
    };
    let playlist = match video.playlist_id {
        Some(playlist_id) => PlaylistRepo::find_summary(&state.pool, playlist_id).await?,
        None => None,
    };
    let categories = CategoryRepo::for_video(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: VideoDetail {
            card: video.into(),
            author,
            sponsored_by,
            playlist,
            categories,
        },
    }))
}

/// PUT /api/v1/content/videos/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<Json<DataResponse<VideoCard>>> {
    validate_optional_choice("platform", input.platform.as_deref(), VALID_PLATFORMS)?;
    validate_optional_choice(
        "content_type",
        input.content_type.as_deref(),
        VALID_VIDEO_CONTENT_TYPES,
    )?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Video", id))?;
    tracing::info!(video_id = id, updated_by = user.user_id, "Video updated");
    Ok(Json(DataResponse { data: video.into() }))
}

/// DELETE /api/v1/content/videos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if VideoRepo::delete(&state.pool, id).await? {
        tracing::info!(video_id = id, deleted_by = user.user_id, "Video deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Video", id))
    }
}

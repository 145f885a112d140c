//! Handlers for the `/content/playlists` resource (addressed by slug).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::content::{total_duration_minutes, VALID_DIFFICULTY_LEVELS};
use bns_core::error::CoreError;
use bns_core::slug::validate_slug;
use bns_db::models::playlist::{CreatePlaylist, Playlist, PlaylistQuery, UpdatePlaylist};
use bns_db::repositories::{PlaylistRepo, VideoRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::videos::VideoCard;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A playlist with its published videos.
#[derive(Debug, Serialize)]
pub struct PlaylistDetail {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub video_count: usize,
    /// Sum of video durations, in minutes.
    pub total_duration: i64,
    pub videos: Vec<VideoCard>,
}

/// POST /api/v1/content/playlists
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreatePlaylist>,
) -> AppResult<(StatusCode, Json<DataResponse<Playlist>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("title is required".into())));
    }
    validate_optional_choice(
        "difficulty_level",
        input.difficulty_level.as_deref(),
        VALID_DIFFICULTY_LEVELS,
    )?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let playlist = PlaylistRepo::create(&state.pool, &input).await?;
    tracing::info!(
        playlist_id = playlist.id,
        slug = %playlist.slug,
        created_by = user.user_id,
        "Playlist created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: playlist })))
}

/// GET /api/v1/content/playlists
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<PlaylistQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<Playlist>>>> {
    validate_optional_choice(
        "difficulty_level",
        filter.difficulty_level.as_deref(),
        VALID_DIFFICULTY_LEVELS,
    )?;
    let playlists = PlaylistRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = PlaylistRepo::count(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, playlists),
    }))
}

/// GET /api/v1/content/playlists/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<PlaylistDetail>>> {
    let playlist = find(&state, slug).await?;
    let videos = VideoRepo::for_playlist(&state.pool, playlist.id).await?;
    let durations: Vec<i32> = videos.iter().filter_map(|v| v.duration_seconds).collect();

    Ok(Json(DataResponse {
        data: PlaylistDetail {
            playlist,
            video_count: videos.len(),
            total_duration: total_duration_minutes(&durations),
            videos: videos.into_iter().map(VideoCard::from).collect(),
        },
    }))
}

/// GET /api/v1/content/playlists/{slug}/videos
pub async fn videos(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<VideoCard>>>> {
    let playlist = find(&state, slug).await?;
    let videos = VideoRepo::for_playlist(&state.pool, playlist.id).await?;
    Ok(Json(DataResponse {
        data: videos.into_iter().map(VideoCard::from).collect(),
    }))
}

/// PUT /api/v1/content/playlists/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(slug): Path<String>,
    Json(input): Json<UpdatePlaylist>,
) -> AppResult<Json<DataResponse<Playlist>>> {
    validate_optional_choice(
        "difficulty_level",
        input.difficulty_level.as_deref(),
        VALID_DIFFICULTY_LEVELS,
    )?;
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }
    let playlist = PlaylistRepo::update(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| AppError::not_found_key("Playlist", slug))?;
    tracing::info!(playlist_id = playlist.id, updated_by = user.user_id, "Playlist updated");
    Ok(Json(DataResponse { data: playlist }))
}

/// DELETE /api/v1/content/playlists/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if PlaylistRepo::delete(&state.pool, &slug).await? {
        tracing::info!(slug = %slug, deleted_by = user.user_id, "Playlist deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found_key("Playlist", slug))
    }
}

async fn find(state: &AppState, slug: String) -> AppResult<Playlist> {
    PlaylistRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::not_found_key("Playlist", slug))
}

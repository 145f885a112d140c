//! Handlers for the `/content/news` resource.
//!
//! Expired items disappear from public reads; staff still see them.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::content::{time_since, BREAKING_NEWS_LIMIT};
use bns_core::error::CoreError;
use bns_core::slug::validate_slug;
use bns_core::types::DbId;
use bns_db::models::news_item::{CreateNewsItem, NewsItem, UpdateNewsItem};
use bns_db::repositories::NewsItemRepo;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A news item with a human "time since published" phrase.
#[derive(Debug, Serialize)]
pub struct NewsView {
    #[serde(flatten)]
    pub item: NewsItem,
    pub time_since_published: String,
}

impl From<NewsItem> for NewsView {
    fn from(item: NewsItem) -> Self {
        let time_since_published = time_since(item.published_at, Utc::now());
        Self {
            item,
            time_since_published,
        }
    }
}

/// POST /api/v1/content/news
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateNewsItem>,
) -> AppResult<(StatusCode, Json<DataResponse<NewsView>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("title is required".into())));
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let item = NewsItemRepo::create(&state.pool, &input).await?;
    tracing::info!(
        news_id = item.id,
        is_breaking = item.is_breaking,
        created_by = user.user_id,
        "News item created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item.into() })))
}

/// GET /api/v1/content/news
pub async fn list(
    State(state): State<AppState>,
    auth: MaybeAuth,
    OriginalUri(uri): OriginalUri,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<NewsView>>>> {
    let current_only = !auth.is_staff();
    let items =
        NewsItemRepo::list(&state.pool, current_only, false, page.limit(), page.offset()).await?;
    let count = NewsItemRepo::count(&state.pool, current_only, false).await?;
    let results = items.into_iter().map(NewsView::from).collect();
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, results),
    }))
}

/// GET /api/v1/content/news/breaking
pub async fn breaking(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NewsView>>>> {
    let items = NewsItemRepo::list(&state.pool, true, true, BREAKING_NEWS_LIMIT, 0).await?;
    Ok(Json(DataResponse {
        data: items.into_iter().map(NewsView::from).collect(),
    }))
}

/// GET /api/v1/content/news/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NewsView>>> {
    let item = NewsItemRepo::find_by_id(&state.pool, id, !auth.is_staff())
        .await?
        .ok_or(AppError::not_found("NewsItem", id))?;
    Ok(Json(DataResponse { data: item.into() }))
}

/// PUT /api/v1/content/news/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNewsItem>,
) -> AppResult<Json<DataResponse<NewsView>>> {
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let item = NewsItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("NewsItem", id))?;
    tracing::info!(news_id = id, updated_by = user.user_id, "News item updated");
    Ok(Json(DataResponse { data: item.into() }))
}

/// DELETE /api/v1/content/news/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NewsItemRepo::delete(&state.pool, id).await? {
        tracing::info!(news_id = id, deleted_by = user.user_id, "News item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("NewsItem", id))
    }
}

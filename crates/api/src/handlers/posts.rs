//! Handlers for the `/content/posts` resource (blog posts, addressed by slug).

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::content::{
    MAX_META_DESCRIPTION_LENGTH, MAX_META_TITLE_LENGTH, POST_STATUS_PUBLISHED,
    RELATED_POST_LIMIT, VALID_POST_STATUSES, VALID_POST_TYPES,
};
use bns_core::error::CoreError;
use bns_core::search::ilike_pattern;
use bns_core::slug::validate_slug;
use bns_db::models::blog_post::{BlogPost, CreateBlogPost, PostQuery, PostSummary, UpdateBlogPost};
use bns_db::models::category::CategorySummary;
use bns_db::models::sponsor_profile::SponsorSummary;
use bns_db::models::user::UserSummary;
use bns_db::models::video::VideoSummary;
use bns_db::repositories::{BlogPostRepo, CategoryRepo, SponsorProfileRepo, UserRepo, VideoRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Full post representation for `GET /content/posts/{slug}`.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub author: Option<UserSummary>,
    pub co_authors: Vec<UserSummary>,
    pub categories: Vec<CategorySummary>,
    pub related_videos: Vec<VideoSummary>,
    pub sponsored_by: Option<SponsorSummary>,
}

fn validate_meta(title: Option<&str>, description: Option<&str>) -> Result<(), CoreError> {
    if title.is_some_and(|t| t.chars().count() > MAX_META_TITLE_LENGTH) {
        return Err(CoreError::Validation(format!(
            "meta_title must be at most {MAX_META_TITLE_LENGTH} characters"
        )));
    }
    if description.is_some_and(|d| d.chars().count() > MAX_META_DESCRIPTION_LENGTH) {
        return Err(CoreError::Validation(format!(
            "meta_description must be at most {MAX_META_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// POST /api/v1/content/posts
///
/// The caller becomes the author. `read_time_minutes` is derived from the
/// content.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogPost>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("title is required".into())));
    }
    validate_choice("post_type", &input.post_type, VALID_POST_TYPES)?;
    validate_optional_choice("status", input.status.as_deref(), VALID_POST_STATUSES)?;
    validate_meta(input.meta_title.as_deref(), input.meta_description.as_deref())?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let post = BlogPostRepo::create(&state.pool, Some(user.user_id), &input).await?;
    tracing::info!(
        post_id = post.id,
        slug = %post.slug,
        status = %post.status,
        author_id = user.user_id,
        "Blog post created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/content/posts
///
/// Anonymous callers see published posts only; staff may filter by
/// `?status=` and see every post without it.
pub async fn list(
    State(state): State<AppState>,
    auth: MaybeAuth,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<PostQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<BlogPost>>>> {
    validate_optional_choice("post_type", filter.post_type.as_deref(), VALID_POST_TYPES)?;
    let status = if auth.is_staff() {
        validate_optional_choice("status", filter.status.as_deref(), VALID_POST_STATUSES)?;
        filter.status.as_deref()
    } else {
        Some(POST_STATUS_PUBLISHED)
    };
    let search = ilike_pattern(filter.search.as_deref());

    let posts = BlogPostRepo::list(
        &state.pool,
        status,
        &filter,
        search.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = BlogPostRepo::count(&state.pool, status, &filter, search.as_deref()).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, posts),
    }))
}

/// GET /api/v1/content/posts/featured
///
/// The most recently published post.
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<DataResponse<BlogPost>>> {
    let post = BlogPostRepo::latest_published(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found_key("BlogPost", "featured"))?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /api/v1/content/posts/{slug}
///
/// Each retrieval counts as a view.
pub async fn get_by_slug(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<PostDetail>>> {
    let mut post = BlogPostRepo::find_by_slug(&state.pool, &slug, !auth.is_staff())
        .await?
        .ok_or_else(|| AppError::not_found_key("BlogPost", slug))?;
    post.view_count = BlogPostRepo::increment_view_count(&state.pool, post.id).await?;

    let author = match post.author_id {
        Some(author_id) => UserRepo::find_summary(&state.pool, author_id).await?,
        None => None,
    };
    let sponsored_by = match post.sponsored_by_id {
        Some(sponsor_id) => SponsorProfileRepo::find_summary(&state.pool, sponsor_id).await?,
        None => None,
    };
    let co_authors = UserRepo::co_authors(&state.pool, post.id).await?;
    let categories = CategoryRepo::for_post(&state.pool, post.id).await?;
    let related_videos = VideoRepo::related_to_post(&state.pool, post.id).await?;

    Ok(Json(DataResponse {
        data: PostDetail {
            post,
            author,
            co_authors,
            categories,
            related_videos,
            sponsored_by,
        },
    }))
}

/// GET /api/v1/content/posts/{slug}/related
pub async fn related(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<PostSummary>>>> {
    let post = BlogPostRepo::find_by_slug(&state.pool, &slug, !auth.is_staff())
        .await?
        .ok_or_else(|| AppError::not_found_key("BlogPost", slug))?;
    let related = BlogPostRepo::related(&state.pool, post.id, RELATED_POST_LIMIT).await?;
    Ok(Json(DataResponse { data: related }))
}

/// PUT /api/v1/content/posts/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(slug): Path<String>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    validate_optional_choice("post_type", input.post_type.as_deref(), VALID_POST_TYPES)?;
    validate_optional_choice("status", input.status.as_deref(), VALID_POST_STATUSES)?;
    validate_meta(input.meta_title.as_deref(), input.meta_description.as_deref())?;
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }
    let post = BlogPostRepo::update(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| AppError::not_found_key("BlogPost", slug))?;
    tracing::info!(
        post_id = post.id,
        status = %post.status,
        updated_by = user.user_id,
        "Blog post updated"
    );
    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/content/posts/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if BlogPostRepo::delete(&state.pool, &slug).await? {
        tracing::info!(slug = %slug, deleted_by = user.user_id, "Blog post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found_key("BlogPost", slug))
    }
}

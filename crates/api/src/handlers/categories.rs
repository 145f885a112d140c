//! Handlers for the `/content/categories` resource.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::error::CoreError;
use bns_core::slug::validate_slug;
use bns_core::types::DbId;
use bns_db::models::category::{Category, CategoryWithCounts, CreateCategory, UpdateCategory};
use bns_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// POST /api/v1/content/categories
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("name is required".into())));
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        category_id = category.id,
        slug = %category.slug,
        created_by = user.user_id,
        "Category created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/content/categories
///
/// Each category carries `video_count` and `post_count` of published content.
pub async fn list(
    State(state): State<AppState>,
    auth: MaybeAuth,
    OriginalUri(uri): OriginalUri,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<CategoryWithCounts>>>> {
    let active_only = !auth.is_staff();
    let categories =
        CategoryRepo::list(&state.pool, active_only, page.limit(), page.offset()).await?;
    let count = CategoryRepo::count(&state.pool, active_only).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, categories),
    }))
}

/// GET /api/v1/content/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CategoryWithCounts>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id, !auth.is_staff())
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/content/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    tracing::info!(category_id = id, updated_by = user.user_id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/content/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, deleted_by = user.user_id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Category", id))
    }
}

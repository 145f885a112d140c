//! Handlers for the `/cms/pages` resource.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::cms::{page_url, PAGE_STATUS_PUBLISHED, VALID_PAGE_STATUSES, VALID_PAGE_TEMPLATES};
use bns_core::error::CoreError;
use bns_core::search::ilike_pattern;
use bns_core::slug::validate_slug;
use bns_core::types::DbId;
use bns_db::models::page::{CreatePage, NavPage, Page, PageQuery, UpdatePage};
use bns_db::repositories::PageRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page as ListPage};
use crate::state::AppState;

/// A page with its public URL.
#[derive(Debug, Serialize)]
pub struct PageView {
    #[serde(flatten)]
    pub page: Page,
    pub url: String,
}

impl From<Page> for PageView {
    fn from(page: Page) -> Self {
        let url = page_url(&page.slug);
        Self { page, url }
    }
}

/// Navigation entry with its public URL.
#[derive(Debug, Serialize)]
pub struct NavLink {
    #[serde(flatten)]
    pub page: NavPage,
    pub url: String,
}

/// POST /api/v1/cms/pages
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<DataResponse<PageView>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("title is required".into())));
    }
    validate_optional_choice("status", input.status.as_deref(), VALID_PAGE_STATUSES)?;
    validate_optional_choice("template", input.template.as_deref(), VALID_PAGE_TEMPLATES)?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let page = PageRepo::create(&state.pool, Some(user.user_id), &input).await?;
    tracing::info!(
        page_id = page.id,
        slug = %page.slug,
        status = %page.status,
        created_by = user.user_id,
        "Page created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: page.into() })))
}

/// GET /api/v1/cms/pages
///
/// Anonymous callers see published pages only.
pub async fn list(
    State(state): State<AppState>,
    auth: MaybeAuth,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<PageQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<ListPage<PageView>>>> {
    let status = if auth.is_staff() {
        validate_optional_choice("status", filter.status.as_deref(), VALID_PAGE_STATUSES)?;
        filter.status.as_deref()
    } else {
        Some(PAGE_STATUS_PUBLISHED)
    };
    list_with_status(&state, &uri, status, &filter, &page).await
}

/// GET /api/v1/cms/pages/published
pub async fn published(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<PageQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<ListPage<PageView>>>> {
    list_with_status(&state, &uri, Some(PAGE_STATUS_PUBLISHED), &filter, &page).await
}

/// GET /api/v1/cms/pages/navigation
pub async fn navigation(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NavLink>>>> {
    let pages = PageRepo::navigation(&state.pool).await?;
    let links = pages
        .into_iter()
        .map(|page| NavLink {
            url: page_url(&page.slug),
            page,
        })
        .collect();
    Ok(Json(DataResponse { data: links }))
}

/// GET /api/v1/cms/pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let page = PageRepo::find_by_id(&state.pool, id, !auth.is_staff())
        .await?
        .ok_or(AppError::not_found("Page", id))?;
    Ok(Json(DataResponse { data: page.into() }))
}

/// PUT /api/v1/cms/pages/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<Json<DataResponse<PageView>>> {
    validate_optional_choice("status", input.status.as_deref(), VALID_PAGE_STATUSES)?;
    validate_optional_choice("template", input.template.as_deref(), VALID_PAGE_TEMPLATES)?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let page = PageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Page", id))?;
    tracing::info!(page_id = id, updated_by = user.user_id, "Page updated");
    Ok(Json(DataResponse { data: page.into() }))
}

/// DELETE /api/v1/cms/pages/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PageRepo::delete(&state.pool, id).await? {
        tracing::info!(page_id = id, deleted_by = user.user_id, "Page deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Page", id))
    }
}

async fn list_with_status(
    state: &AppState,
    uri: &axum::http::Uri,
    status: Option<&str>,
    filter: &PageQuery,
    page: &PaginationParams,
) -> AppResult<Json<DataResponse<ListPage<PageView>>>> {
    validate_optional_choice("template", filter.template.as_deref(), VALID_PAGE_TEMPLATES)?;
    let search = ilike_pattern(filter.search.as_deref());
    let pages = PageRepo::list(
        &state.pool,
        status,
        filter,
        search.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = PageRepo::count(&state.pool, status, filter, search.as_deref()).await?;
    let results = pages.into_iter().map(PageView::from).collect();
    Ok(Json(DataResponse {
        data: ListPage::new(uri, page, count, results),
    }))
}

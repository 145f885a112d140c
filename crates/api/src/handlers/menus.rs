//! Handlers for the `/cms/menus` and `/cms/menu-items` resources.
//!
//! Menu reads are public and only ever expose active items, assembled into
//! a tree. Writes are staff only.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::cms::{
    build_menu_tree, resolve_menu_url, validate_menu_link, MenuNode, DEFAULT_MENU_LOCATION,
    LINK_PAGE, VALID_LINK_TYPES, VALID_MENU_LOCATIONS,
};
use bns_core::error::CoreError;
use bns_core::slug::validate_slug;
use bns_core::types::DbId;
use bns_db::models::menu::{
    CreateMenu, CreateMenuItem, Menu, MenuItem, MenuItemLink, MenuItemQuery, MenuWithCount,
    UpdateMenu, UpdateMenuItem,
};
use bns_db::repositories::MenuRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::{LocationParam, PaginationParams};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A menu with its active item tree.
#[derive(Debug, Serialize)]
pub struct MenuDetail {
    #[serde(flatten)]
    pub menu: MenuWithCount,
    pub items: Vec<MenuNode>,
}

fn to_node(link: MenuItemLink) -> MenuNode {
    let url = resolve_menu_url(
        &link.link_type,
        link.page_slug.as_deref(),
        Some(link.url.as_str()),
        link.category_slug.as_deref(),
    );
    MenuNode {
        id: link.id,
        parent_id: link.parent_id,
        title: link.title,
        url,
        icon: Some(link.icon).filter(|s| !s.is_empty()),
        css_class: Some(link.css_class).filter(|s| !s.is_empty()),
        target_new_tab: link.target_new_tab,
        sort_order: link.sort_order,
        children: Vec::new(),
    }
}

async fn with_tree(state: &AppState, menu: MenuWithCount) -> AppResult<MenuDetail> {
    let links = MenuRepo::active_links(&state.pool, menu.menu.id).await?;
    let items = build_menu_tree(links.into_iter().map(to_node).collect());
    Ok(MenuDetail { menu, items })
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

/// POST /api/v1/cms/menus
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateMenu>,
) -> AppResult<(StatusCode, Json<DataResponse<Menu>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("name is required".into())));
    }
    validate_optional_choice("location", input.location.as_deref(), VALID_MENU_LOCATIONS)?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let menu = MenuRepo::create(&state.pool, &input).await?;
    tracing::info!(
        menu_id = menu.id,
        location = %menu.location,
        created_by = user.user_id,
        "Menu created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: menu })))
}

/// GET /api/v1/cms/menus
pub async fn list(
    State(state): State<AppState>,
    auth: MaybeAuth,
    OriginalUri(uri): OriginalUri,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<MenuWithCount>>>> {
    let active_only = !auth.is_staff();
    let menus = MenuRepo::list(&state.pool, active_only, page.limit(), page.offset()).await?;
    let count = MenuRepo::count(&state.pool, active_only).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, menus),
    }))
}

/// GET /api/v1/cms/menus/by-location?location=
pub async fn by_location(
    State(state): State<AppState>,
    Query(params): Query<LocationParam>,
) -> AppResult<Json<DataResponse<MenuDetail>>> {
    let location = params
        .location
        .unwrap_or_else(|| DEFAULT_MENU_LOCATION.to_string());
    let menu = MenuRepo::find_by_location(&state.pool, &location)
        .await?
        .ok_or_else(|| AppError::not_found_key("Menu", location))?;
    Ok(Json(DataResponse {
        data: with_tree(&state, menu).await?,
    }))
}

/// GET /api/v1/cms/menus/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MenuDetail>>> {
    let menu = MenuRepo::find_by_id(&state.pool, id, !auth.is_staff())
        .await?
        .ok_or(AppError::not_found("Menu", id))?;
    Ok(Json(DataResponse {
        data: with_tree(&state, menu).await?,
    }))
}

/// PUT /api/v1/cms/menus/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenu>,
) -> AppResult<Json<DataResponse<Menu>>> {
    validate_optional_choice("location", input.location.as_deref(), VALID_MENU_LOCATIONS)?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    let menu = MenuRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Menu", id))?;
    tracing::info!(menu_id = id, updated_by = user.user_id, "Menu updated");
    Ok(Json(DataResponse { data: menu }))
}

/// DELETE /api/v1/cms/menus/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MenuRepo::delete(&state.pool, id).await? {
        tracing::info!(menu_id = id, deleted_by = user.user_id, "Menu deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Menu", id))
    }
}

// ---------------------------------------------------------------------------
// Menu items
// ---------------------------------------------------------------------------

/// POST /api/v1/cms/menu-items
pub async fn create_item(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateMenuItem>,
) -> AppResult<(StatusCode, Json<DataResponse<MenuItem>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("title is required".into())));
    }
    let link_type = input.link_type.as_deref().unwrap_or(LINK_PAGE);
    validate_menu_link(link_type, input.page_id, input.url.as_deref(), input.category_id)?;
    let item = MenuRepo::create_item(&state.pool, &input).await?;
    tracing::info!(
        menu_item_id = item.id,
        menu_id = item.menu_id,
        created_by = user.user_id,
        "Menu item created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/cms/menu-items
pub async fn list_items(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<MenuItemQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<MenuItem>>>> {
    let items = MenuRepo::list_items(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = MenuRepo::count_items(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, items),
    }))
}

/// GET /api/v1/cms/menu-items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MenuItem>>> {
    let item = MenuRepo::find_item(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("MenuItem", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/cms/menu-items/{id}
///
/// When the link type or its target changes, the resulting combination is
/// validated as a whole.
pub async fn update_item(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenuItem>,
) -> AppResult<Json<DataResponse<MenuItem>>> {
    validate_optional_choice("link_type", input.link_type.as_deref(), VALID_LINK_TYPES)?;
    let current = MenuRepo::find_item(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("MenuItem", id))?;
    let link_type = input.link_type.as_deref().unwrap_or(&current.link_type);
    validate_menu_link(
        link_type,
        input.page_id.or(current.page_id),
        Some(input.url.as_deref().unwrap_or(&current.url)),
        input.category_id.or(current.category_id),
    )?;
    if input.parent_id == Some(id) {
        return Err(AppError::BadRequest("A menu item cannot be its own parent".into()));
    }

    let item = MenuRepo::update_item(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("MenuItem", id))?;
    tracing::info!(menu_item_id = id, updated_by = user.user_id, "Menu item updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/cms/menu-items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MenuRepo::delete_item(&state.pool, id).await? {
        tracing::info!(menu_item_id = id, deleted_by = user.user_id, "Menu item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("MenuItem", id))
    }
}

//! Handlers for the `/cms/settings` resource.
//!
//! Values are stored as text and checked against their declared
//! `value_type` on every write. Responses also carry the value parsed to
//! its JSON type.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::validate_optional_choice;
use bns_core::cms::{
    setting_value_display, validate_setting_key, validate_setting_value,
    DEFAULT_SETTING_CATEGORY, VALID_SETTING_CATEGORIES,
};
use bns_core::types::DbId;
use bns_db::models::site_setting::{
    CreateSiteSetting, SettingQuery, SiteSetting, UpdateSiteSetting,
};
use bns_db::repositories::SiteSettingRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireStaff;
use crate::query::{CategoryParam, PaginationParams};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A setting with its typed value.
#[derive(Debug, Serialize)]
pub struct SettingView {
    #[serde(flatten)]
    pub setting: SiteSetting,
    pub typed_value: serde_json::Value,
}

impl From<SiteSetting> for SettingView {
    fn from(setting: SiteSetting) -> Self {
        let typed_value = setting_value_display(&setting.value_type, &setting.value);
        Self {
            setting,
            typed_value,
        }
    }
}

fn views(settings: Vec<SiteSetting>) -> Vec<SettingView> {
    settings.into_iter().map(SettingView::from).collect()
}

/// POST /api/v1/cms/settings
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateSiteSetting>,
) -> AppResult<(StatusCode, Json<DataResponse<SettingView>>)> {
    validate_setting_key(&input.key)?;
    validate_setting_value(input.value_type.as_deref().unwrap_or("text"), &input.value)?;
    validate_optional_choice("category", input.category.as_deref(), VALID_SETTING_CATEGORIES)?;
    let setting = SiteSettingRepo::create(&state.pool, &input).await?;
    tracing::info!(
        setting_id = setting.id,
        key = %setting.key,
        created_by = user.user_id,
        "Site setting created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: setting.into() })))
}

/// GET /api/v1/cms/settings
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<SettingQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<SettingView>>>> {
    let settings =
        SiteSettingRepo::list(&state.pool, &filter, false, page.limit(), page.offset()).await?;
    let count = SiteSettingRepo::count(&state.pool, &filter, false).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, views(settings)),
    }))
}

/// GET /api/v1/cms/settings/public
pub async fn public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SettingView>>>> {
    let settings = SiteSettingRepo::all(&state.pool, None, true).await?;
    Ok(Json(DataResponse {
        data: views(settings),
    }))
}

/// GET /api/v1/cms/settings/by-category?category=
///
/// Anonymous callers only see public settings.
pub async fn by_category(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Query(params): Query<CategoryParam>,
) -> AppResult<Json<DataResponse<Vec<SettingView>>>> {
    let category = params
        .category
        .unwrap_or_else(|| DEFAULT_SETTING_CATEGORY.to_string());
    let settings = SiteSettingRepo::all(&state.pool, Some(&category), !auth.is_staff()).await?;
    Ok(Json(DataResponse {
        data: views(settings),
    }))
}

/// GET /api/v1/cms/settings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SettingView>>> {
    let setting = SiteSettingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("SiteSetting", id))?;
    Ok(Json(DataResponse { data: setting.into() }))
}

/// PUT /api/v1/cms/settings/{id}
///
/// The resulting value/type pair is validated, so changing only the type
/// re-checks the stored value.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSiteSetting>,
) -> AppResult<Json<DataResponse<SettingView>>> {
    validate_optional_choice("category", input.category.as_deref(), VALID_SETTING_CATEGORIES)?;
    let current = SiteSettingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("SiteSetting", id))?;
    validate_setting_value(
        input.value_type.as_deref().unwrap_or(&current.value_type),
        input.value.as_deref().unwrap_or(&current.value),
    )?;

    let setting = SiteSettingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("SiteSetting", id))?;
    tracing::info!(
        setting_id = id,
        key = %setting.key,
        updated_by = user.user_id,
        "Site setting updated"
    );
    Ok(Json(DataResponse { data: setting.into() }))
}

/// DELETE /api/v1/cms/settings/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SiteSettingRepo::delete(&state.pool, id).await? {
        tracing::info!(setting_id = id, deleted_by = user.user_id, "Site setting deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("SiteSetting", id))
    }
}

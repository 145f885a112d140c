//! Handlers for the `/accounts/users` resource.
//!
//! Registration is public; everything else needs a session. Users may read
//! and edit their own record, staff may list, admins may change roles,
//! activation and delete.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::error::CoreError;
use bns_core::newsletter::normalize_email;
use bns_core::roles::{validate_role, DEFAULT_ROLE, ROLE_ADMIN, ROLE_DONOR, ROLE_SPONSOR};
use bns_core::search::ilike_pattern;
use bns_core::types::DbId;
use bns_db::models::user::{CreateUser, UpdateUser, UserQuery, UserResponse};
use bns_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Request body for `POST /accounts/users` (self-registration).
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// POST /api/v1/accounts/users
///
/// Public registration. New accounts always get the default role.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let email = normalize_email(&input.email)?;
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username is required".into(),
        )));
    }
    if input.password != input.password_confirm {
        return Err(AppError::Core(CoreError::Validation(
            "Passwords don't match".into(),
        )));
    }
    validate_password_strength(&input.password, state.config.password_min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with that email already exists".into(),
        )));
    }
    if UserRepo::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with that username already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            username: username.to_string(),
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            role: DEFAULT_ROLE.to_string(),
            phone: String::new(),
            organization: String::new(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// GET /api/v1/accounts/users
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<UserQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<UserResponse>>>> {
    list_matching(&state, &uri, filter, &page).await
}

/// GET /api/v1/accounts/users/donors
pub async fn donors(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<UserResponse>>>> {
    let filter = UserQuery {
        role: Some(ROLE_DONOR.to_string()),
        search: None,
    };
    list_matching(&state, &uri, filter, &page).await
}

/// GET /api/v1/accounts/users/sponsors
pub async fn sponsors(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<UserResponse>>>> {
    let filter = UserQuery {
        role: Some(ROLE_SPONSOR.to_string()),
        search: None,
    };
    list_matching(&state, &uri, filter, &page).await
}

/// GET /api/v1/accounts/users/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    get_user(&state, auth_user.user_id).await
}

/// PUT /api/v1/accounts/users/me
///
/// Profile fields only; role and status changes are ignored here.
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.role = None;
    input.is_active = None;
    input.is_verified = None;
    apply_update(&state, auth_user.user_id, &input).await
}

/// GET /api/v1/accounts/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if id != auth_user.user_id && !auth_user.is_staff() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only view your own account".into(),
        )));
    }
    get_user(&state, id).await
}

/// PUT /api/v1/accounts/users/{id}
///
/// The account owner may edit profile fields; `role`, `is_active` and
/// `is_verified` require an admin.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let is_admin = auth_user.role == ROLE_ADMIN;
    if id != auth_user.user_id && !is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only edit your own account".into(),
        )));
    }
    let privileged =
        input.role.is_some() || input.is_active.is_some() || input.is_verified.is_some();
    if privileged && !is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required to change role or account status".into(),
        )));
    }
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    apply_update(&state, id, &input).await
}

/// DELETE /api/v1/accounts/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".into(),
        ));
    }
    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User", id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn list_matching(
    state: &AppState,
    uri: &axum::http::Uri,
    filter: UserQuery,
    page: &PaginationParams,
) -> AppResult<Json<DataResponse<Page<UserResponse>>>> {
    if let Some(role) = &filter.role {
        validate_role(role)?;
    }
    let search = ilike_pattern(filter.search.as_deref());
    let users = UserRepo::list(
        &state.pool,
        &filter,
        search.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = UserRepo::count(&state.pool, &filter, search.as_deref()).await?;
    let results = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse {
        data: Page::new(uri, page, count, results),
    }))
}

async fn get_user(state: &AppState, id: DbId) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    Ok(Json(DataResponse { data: user.into() }))
}

async fn apply_update(
    state: &AppState,
    id: DbId,
    input: &UpdateUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::update(&state.pool, id, input)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    tracing::info!(user_id = id, "User updated");
    Ok(Json(DataResponse { data: user.into() }))
}

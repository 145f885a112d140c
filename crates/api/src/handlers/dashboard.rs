//! Handlers for the dashboard's own pages: the endpoint index and the
//! theme preference.

use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, Uri};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use bns_core::dashboard::Theme;
use cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::dashboard::negotiate::{request_wants_html, theme_from_headers, HTML_CONTENT_TYPE};
use crate::dashboard::registry::ENDPOINT_GROUPS;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api
///
/// The endpoint index: an HTML page for browsers, the same groups as JSON
/// otherwise.
pub async fn api_index(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let groups = || Json(DataResponse { data: ENDPOINT_GROUPS.as_slice() });
    if !request_wants_html(&headers, &uri) {
        return groups().into_response();
    }
    match state.dashboard.render_index(theme_from_headers(&headers)) {
        Ok(html) => ([(CONTENT_TYPE, HTML_CONTENT_TYPE)], html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Dashboard index render failed");
            groups().into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: &'static str,
}

/// POST /api/theme
///
/// Stores `light` or `dark` in the `theme` cookie for a year.
pub async fn set_theme(
    State(state): State<AppState>,
    Json(input): Json<ThemeRequest>,
) -> AppResult<impl IntoResponse> {
    let theme = Theme::parse(&input.theme)
        .ok_or_else(|| AppError::BadRequest("theme must be 'light' or 'dark'".into()))?;
    let cookie = Cookie::build((Theme::COOKIE, theme.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(cookie::time::Duration::days(365))
        .build()
        .to_string();
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(DataResponse {
            data: ThemeResponse {
                theme: theme.as_str(),
            },
        }),
    ))
}

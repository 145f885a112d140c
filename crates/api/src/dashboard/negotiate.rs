//! Response negotiation middleware for the HTML dashboard.

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Query, Request, State};
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, VARY};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use bns_core::dashboard::{wants_html, Theme};
use serde::Deserialize;

use super::registry::lookup;
use super::renderer::RenderRequest;
use crate::auth::jwt::cookie_value;
use crate::error::AppError;
use crate::state::AppState;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// The `?format=` override.
#[derive(Debug, Default, Deserialize)]
pub struct FormatParam {
    pub format: Option<String>,
}

/// Whether the request asks for the HTML dashboard.
pub fn request_wants_html(headers: &HeaderMap, uri: &axum::http::Uri) -> bool {
    let accept = headers.get(ACCEPT).and_then(|v| v.to_str().ok());
    let format = Query::<FormatParam>::try_from_uri(uri)
        .ok()
        .and_then(|Query(p)| p.format);
    wants_html(accept, format.as_deref())
}

/// Theme chosen by the `theme` cookie.
pub fn theme_from_headers(headers: &HeaderMap) -> Theme {
    let value = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| cookie_value(header, Theme::COOKIE));
    Theme::from_cookie(value.as_deref())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Buffer a JSON body for rendering. A body that fails mid-read cannot be
/// passed on, so the client gets a 500 in the API error shape instead.
async fn buffer_body(body: Body, path: &str) -> Result<Bytes, Response> {
    to_bytes(body, usize::MAX).await.map_err(|e| {
        AppError::InternalError(format!("Failed to read response body for {path}: {e}"))
            .into_response()
    })
}

/// Render JSON responses as HTML for requests that prefer it.
///
/// Anything that is not a JSON body passes through untouched, and a
/// template failure falls back to the original JSON.
pub async fn negotiate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !request_wants_html(request.headers(), request.uri()) {
        return next.run(request).await;
    }

    let theme = theme_from_headers(request.headers());
    let path = request.uri().path().to_string();
    let method = request.method().to_string();

    let response = next.run(request).await;
    if !is_json(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match buffer_body(body, &path).await {
        Ok(bytes) => bytes,
        Err(failed) => return failed,
    };
    let Ok(value) = serde_json::from_slice(&bytes) else {
        return Response::from_parts(parts, Body::from(bytes));
    };

    let render_request = RenderRequest {
        path: &path,
        method: &method,
        status: parts.status.as_u16(),
        theme,
        resource: lookup(&path),
    };
    match state.dashboard.render(value, &render_request) {
        Ok(html) => {
            parts.headers.remove(CONTENT_LENGTH);
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE));
            parts.headers.insert(VARY, HeaderValue::from_static("Accept"));
            Response::from_parts(parts, Body::from(html))
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path, "Dashboard render failed");
            Response::from_parts(parts, Body::from(bytes))
        }
    }
}

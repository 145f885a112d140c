//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project conventions.
//! Use [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization. Lists wrap a
//! [`Page`] inside the envelope.

use axum::http::Uri;
use bns_core::search::page_links;
use serde::Serialize;

use crate::query::PaginationParams;

/// Standard `{ "data": T }` response envelope.
///
/// Wraps any serializable payload in the project's standard response format.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A human-readable acknowledgement for actions without a resource body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> DataResponse<Self> {
        DataResponse {
            data: Self {
                message: message.into(),
            },
        }
    }
}

/// One page of a list endpoint: `{count, next, previous, results}`.
///
/// `next` and `previous` are request-relative links carrying the caller's
/// other query parameters, or `null` at either end.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(uri: &Uri, params: &PaginationParams, count: i64, results: Vec<T>) -> Self {
        let limit = params.limit();
        let (next, previous) = page_links(count, limit, params.offset());
        Self {
            count,
            next: next.map(|offset| page_href(uri, limit, offset)),
            previous: previous.map(|offset| page_href(uri, limit, offset)),
            results,
        }
    }
}

/// Rebuild `uri` with its `limit`/`offset` replaced, keeping every other
/// query parameter as sent.
fn page_href(uri: &Uri, limit: i64, offset: i64) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or("");
            !pair.is_empty() && key != "limit" && key != "offset"
        })
        .map(str::to_string)
        .collect();
    pairs.push(format!("limit={limit}"));
    pairs.push(format!("offset={offset}"));
    format!("{}?{}", uri.path(), pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: i64, offset: i64) -> PaginationParams {
        PaginationParams {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    #[test]
    fn middle_page_links_both_ways() {
        let uri: Uri = "/api/v1/content/videos?platform=tiktok&limit=10&offset=10"
            .parse()
            .unwrap();
        let page = Page::new(&uri, &params(10, 10), 35, vec![1, 2, 3]);
        assert_eq!(
            page.next.as_deref(),
            Some("/api/v1/content/videos?platform=tiktok&limit=10&offset=20")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("/api/v1/content/videos?platform=tiktok&limit=10&offset=0")
        );
    }

    #[test]
    fn first_and_last_pages_have_no_outer_links() {
        let uri: Uri = "/api/v1/content/news".parse().unwrap();
        let first = Page::new(&uri, &params(20, 0), 5, vec![0; 5]);
        assert!(first.next.is_none());
        assert!(first.previous.is_none());
    }
}

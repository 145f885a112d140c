//! Route definitions for the `/analytics` area.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{engagement, funnel, page_views};
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET, POST     /pageviews              -> list (staff), record (public)
/// GET           /pageviews/summary      -> summary
/// GET, DELETE   /pageviews/{id}         -> get_by_id, delete
///
/// GET, POST     /engagement             -> list (staff), record (public)
/// GET           /engagement/by-video    -> by_video
/// DELETE        /engagement/{id}        -> delete
///
/// GET, POST     /funnel                 -> list, record
/// GET           /funnel/summary         -> summary
/// DELETE        /funnel/{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/pageviews",
            get(page_views::list).post(page_views::record),
        )
        .route("/pageviews/summary", get(page_views::summary))
        .route(
            "/pageviews/{id}",
            get(page_views::get_by_id).delete(page_views::delete),
        )
        .route(
            "/engagement",
            get(engagement::list).post(engagement::record),
        )
        .route("/engagement/by-video", get(engagement::by_video))
        .route("/engagement/{id}", delete(engagement::delete))
        .route("/funnel", get(funnel::list).post(funnel::record))
        .route("/funnel/summary", get(funnel::summary))
        .route("/funnel/{id}", delete(funnel::delete))
}

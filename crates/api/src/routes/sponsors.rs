//! Route definitions for the `/sponsors` area (staff only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{deliverables, donations, sponsor_assets, sponsor_dashboard};
use crate::state::AppState;

/// Routes mounted at `/sponsors`.
///
/// ```text
/// GET, POST          /donations                     -> list, create
/// GET                /donations/statistics          -> statistics
/// GET, PUT, DELETE   /donations/{id}                -> get_by_id, update, delete
/// POST               /donations/{id}/status         -> change_status
///
/// GET, POST          /deliverables                  -> list, create
/// GET, PUT, DELETE   /deliverables/{id}             -> get_by_id, update, delete
/// POST               /deliverables/{id}/progress    -> progress
///
/// GET, POST          /assets                        -> list, create
/// GET                /assets/by-sponsor             -> by_sponsor
/// GET, PUT, DELETE   /assets/{id}                   -> get_by_id, update, delete
///
/// GET                /dashboard                     -> sponsor dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donations", get(donations::list).post(donations::create))
        .route("/donations/statistics", get(donations::statistics))
        .route(
            "/donations/{id}",
            get(donations::get_by_id)
                .put(donations::update)
                .delete(donations::delete),
        )
        .route("/donations/{id}/status", post(donations::change_status))
        .route(
            "/deliverables",
            get(deliverables::list).post(deliverables::create),
        )
        .route(
            "/deliverables/{id}",
            get(deliverables::get_by_id)
                .put(deliverables::update)
                .delete(deliverables::delete),
        )
        .route("/deliverables/{id}/progress", post(deliverables::progress))
        .route(
            "/assets",
            get(sponsor_assets::list).post(sponsor_assets::create),
        )
        .route("/assets/by-sponsor", get(sponsor_assets::by_sponsor))
        .route(
            "/assets/{id}",
            get(sponsor_assets::get_by_id)
                .put(sponsor_assets::update)
                .delete(sponsor_assets::delete),
        )
        .route("/dashboard", get(sponsor_dashboard::get))
}

//! Dashboard pages served outside `/api/v1`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /api          -> api_index
/// POST /api/theme    -> set_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(dashboard::api_index))
        .route("/api/theme", post(dashboard::set_theme))
}

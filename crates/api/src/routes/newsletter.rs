//! Route definitions for the `/newsletter` area.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{campaigns, email_logs, subscribers};
use crate::state::AppState;

/// Routes mounted at `/newsletter`.
///
/// ```text
/// GET, POST          /subscribers                 -> list (staff), subscribe (public)
/// POST               /subscribers/confirm         -> confirm (public)
/// POST               /subscribers/unsubscribe     -> unsubscribe (public)
/// GET, PUT, DELETE   /subscribers/{id}            -> get_by_id, update, delete
///
/// GET, POST          /campaigns                   -> list, create
/// GET, PUT, DELETE   /campaigns/{id}              -> get_by_id, update, delete
/// POST               /campaigns/{id}/send         -> send
/// POST               /campaigns/{id}/mark-sent    -> mark_sent
///
/// GET, POST          /email-logs                  -> list, record_send
/// GET                /email-logs/{id}             -> get_by_id
/// POST               /email-logs/{id}/opened      -> opened (public tracking)
/// POST               /email-logs/{id}/clicked     -> clicked (public tracking)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/subscribers",
            get(subscribers::list).post(subscribers::subscribe),
        )
        .route("/subscribers/confirm", post(subscribers::confirm))
        .route("/subscribers/unsubscribe", post(subscribers::unsubscribe))
        .route(
            "/subscribers/{id}",
            get(subscribers::get_by_id)
                .put(subscribers::update)
                .delete(subscribers::delete),
        )
        .route("/campaigns", get(campaigns::list).post(campaigns::create))
        .route(
            "/campaigns/{id}",
            get(campaigns::get_by_id)
                .put(campaigns::update)
                .delete(campaigns::delete),
        )
        .route("/campaigns/{id}/send", post(campaigns::send))
        .route("/campaigns/{id}/mark-sent", post(campaigns::mark_sent))
        .route(
            "/email-logs",
            get(email_logs::list).post(email_logs::record_send),
        )
        .route("/email-logs/{id}", get(email_logs::get_by_id))
        .route("/email-logs/{id}/opened", post(email_logs::opened))
        .route("/email-logs/{id}/clicked", post(email_logs::clicked))
}

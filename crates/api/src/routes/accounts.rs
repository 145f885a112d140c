//! Route definitions for the `/accounts` area.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{donors, organization, partners, sponsors, users};
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// GET, POST          /users                          -> list, register
/// GET                /users/donors                   -> donors
/// GET                /users/sponsors                 -> sponsors
/// GET, PUT           /users/me                       -> me, update_me
/// GET, PUT, DELETE   /users/{id}                     -> get_by_id, update, delete
///
/// GET, POST          /donors                         -> list, create
/// GET, PUT, DELETE   /donors/{id}                    -> get_by_id, update, delete
/// POST               /donors/{id}/record-donation    -> record_donation
///
/// GET, POST          /sponsors                       -> list, create
/// GET, PUT, DELETE   /sponsors/{id}                  -> get_by_id, update, delete
/// GET                /sponsors/{id}/deliverables     -> deliverables summary
///
/// GET, POST          /partners                       -> list, create
/// GET, PUT, DELETE   /partners/{slug}                -> get_by_slug, update, delete
///
/// GET, PUT           /organization                   -> get, update (admin)
/// GET                /organization/public            -> public
/// GET                /organization/impact            -> impact
/// GET                /organization/brand             -> brand
/// GET                /organization/contact           -> contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::register))
        .route("/users/donors", get(users::donors))
        .route("/users/sponsors", get(users::sponsors))
        .route("/users/me", get(users::me).put(users::update_me))
        .route(
            "/users/{id}",
            get(users::get_by_id).put(users::update).delete(users::delete),
        )
        .route("/donors", get(donors::list).post(donors::create))
        .route(
            "/donors/{id}",
            get(donors::get_by_id).put(donors::update).delete(donors::delete),
        )
        .route("/donors/{id}/record-donation", post(donors::record_donation))
        .route("/sponsors", get(sponsors::list).post(sponsors::create))
        .route(
            "/sponsors/{id}",
            get(sponsors::get_by_id)
                .put(sponsors::update)
                .delete(sponsors::delete),
        )
        .route("/sponsors/{id}/deliverables", get(sponsors::deliverables))
        .route("/partners", get(partners::list).post(partners::create))
        .route(
            "/partners/{slug}",
            get(partners::get_by_slug)
                .put(partners::update)
                .delete(partners::delete),
        )
        .route(
            "/organization",
            get(organization::get).put(organization::update),
        )
        .route("/organization/public", get(organization::public))
        .route("/organization/impact", get(organization::impact))
        .route("/organization/brand", get(organization::brand))
        .route("/organization/contact", get(organization::contact))
}

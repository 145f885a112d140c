//! Route definitions for the `/cms` area.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use bns_core::cms::MAX_UPLOAD_BYTES;

use crate::handlers::{media, menus, pages, settings, widgets};
use crate::state::AppState;

/// Room for multipart boundaries and the metadata fields around the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/cms`.
///
/// ```text
/// GET, POST          /pages                    -> list, create
/// GET                /pages/published          -> published
/// GET                /pages/navigation         -> navigation
/// GET, PUT, DELETE   /pages/{id}               -> get_by_id, update, delete
///
/// GET, POST          /menus                    -> list, create
/// GET                /menus/by-location        -> by_location
/// GET, PUT, DELETE   /menus/{id}               -> get_by_id, update, delete
/// GET, POST          /menu-items               -> list_items, create_item
/// GET, PUT, DELETE   /menu-items/{id}          -> get_item, update_item, delete_item
///
/// GET, POST          /settings                 -> list, create
/// GET                /settings/public          -> public
/// GET                /settings/by-category     -> by_category
/// GET, PUT, DELETE   /settings/{id}            -> get_by_id, update, delete
///
/// GET, POST          /widgets                  -> list, create
/// GET                /widgets/active           -> active
/// GET                /widgets/by-type          -> by_type
/// GET, PUT, DELETE   /widgets/{id}             -> get_by_id, update, delete
///
/// GET, POST          /media                    -> list, upload (multipart)
/// GET                /media/by-folder          -> by_folder
/// GET                /media/by-type            -> by_type
/// GET, PUT, DELETE   /media/{id}               -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages", get(pages::list).post(pages::create))
        .route("/pages/published", get(pages::published))
        .route("/pages/navigation", get(pages::navigation))
        .route(
            "/pages/{id}",
            get(pages::get_by_id).put(pages::update).delete(pages::delete),
        )
        .route("/menus", get(menus::list).post(menus::create))
        .route("/menus/by-location", get(menus::by_location))
        .route(
            "/menus/{id}",
            get(menus::get_by_id).put(menus::update).delete(menus::delete),
        )
        .route(
            "/menu-items",
            get(menus::list_items).post(menus::create_item),
        )
        .route(
            "/menu-items/{id}",
            get(menus::get_item)
                .put(menus::update_item)
                .delete(menus::delete_item),
        )
        .route("/settings", get(settings::list).post(settings::create))
        .route("/settings/public", get(settings::public))
        .route("/settings/by-category", get(settings::by_category))
        .route(
            "/settings/{id}",
            get(settings::get_by_id)
                .put(settings::update)
                .delete(settings::delete),
        )
        .route("/widgets", get(widgets::list).post(widgets::create))
        .route("/widgets/active", get(widgets::active))
        .route("/widgets/by-type", get(widgets::by_type))
        .route(
            "/widgets/{id}",
            get(widgets::get_by_id)
                .put(widgets::update)
                .delete(widgets::delete),
        )
        .route(
            "/media",
            get(media::list)
                .post(media::upload)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/media/by-folder", get(media::by_folder))
        .route("/media/by-type", get(media::by_type))
        .route(
            "/media/{id}",
            get(media::get_by_id).put(media::update).delete(media::delete),
        )
}

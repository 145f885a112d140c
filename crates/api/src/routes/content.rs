//! Route definitions for the `/content` area.

use axum::routing::get;
use axum::Router;

use crate::handlers::{categories, news, playlists, posts, videos};
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET, POST          /categories                 -> list, create
/// GET, PUT, DELETE   /categories/{id}            -> get_by_id, update, delete
///
/// GET, POST          /videos                     -> list, create
/// GET                /videos/featured            -> featured
/// GET                /videos/by-platform         -> by_platform
/// GET, PUT, DELETE   /videos/{id}                -> get_by_id, update, delete
///
/// GET, POST          /playlists                  -> list, create
/// GET, PUT, DELETE   /playlists/{slug}           -> get_by_slug, update, delete
/// GET                /playlists/{slug}/videos    -> videos
///
/// GET, POST          /posts                      -> list, create
/// GET                /posts/featured             -> featured
/// GET, PUT, DELETE   /posts/{slug}               -> get_by_slug, update, delete
/// GET                /posts/{slug}/related       -> related
///
/// GET, POST          /news                       -> list, create
/// GET                /news/breaking              -> breaking
/// GET, PUT, DELETE   /news/{id}                  -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/videos", get(videos::list).post(videos::create))
        .route("/videos/featured", get(videos::featured))
        .route("/videos/by-platform", get(videos::by_platform))
        .route(
            "/videos/{id}",
            get(videos::get_by_id).put(videos::update).delete(videos::delete),
        )
        .route("/playlists", get(playlists::list).post(playlists::create))
        .route(
            "/playlists/{slug}",
            get(playlists::get_by_slug)
                .put(playlists::update)
                .delete(playlists::delete),
        )
        .route("/playlists/{slug}/videos", get(playlists::videos))
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/featured", get(posts::featured))
        .route(
            "/posts/{slug}",
            get(posts::get_by_slug).put(posts::update).delete(posts::delete),
        )
        .route("/posts/{slug}/related", get(posts::related))
        .route("/news", get(news::list).post(news::create))
        .route("/news/breaking", get(news::breaking))
        .route(
            "/news/{id}",
            get(news::get_by_id).put(news::update).delete(news::delete),
        )
}

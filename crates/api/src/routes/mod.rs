pub mod accounts;
pub mod analytics;
pub mod auth;
pub mod cms;
pub mod content;
pub mod dashboard;
pub mod health;
pub mod newsletter;
pub mod sponsors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy (each area documents its own routes):
///
/// ```text
/// /auth/login, /auth/refresh, /auth/logout, /auth/me
///
/// /accounts/users          users, registration, own profile
/// /accounts/donors         donor profiles, record donation
/// /accounts/sponsors       sponsor profiles, deliverables summary
/// /accounts/partners       consortium partners (by slug)
/// /accounts/organization   organisation profile and public projections
///
/// /content/categories      categories with video/post counts
/// /content/videos          videos, featured, by platform
/// /content/playlists       playlists (by slug) with videos
/// /content/posts           blog posts (by slug), featured, related
/// /content/news            news items, breaking
///
/// /newsletter/subscribers  subscribe, confirm, unsubscribe
/// /newsletter/campaigns    campaigns, send, mark sent
/// /newsletter/email-logs   per-email logs, open/click tracking
///
/// /sponsors/donations      donations, statistics, status transitions
/// /sponsors/deliverables   deliverables, progress
/// /sponsors/assets         sponsor brand assets
/// /sponsors/dashboard      sponsorship overview
///
/// /analytics/pageviews     page views, summary
/// /analytics/engagement    video engagement, by video
/// /analytics/funnel        donor funnel, summary
///
/// /cms/pages               pages, published, navigation
/// /cms/menus               menus with item trees, by location
/// /cms/menu-items          menu items
/// /cms/settings            site settings, public, by category
/// /cms/widgets             widgets, active, by type
/// /cms/media               media library, uploads
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        .nest("/accounts", accounts::router())
        .nest("/content", content::router())
        .nest("/newsletter", newsletter::router())
        .nest("/sponsors", sponsors::router())
        .nest("/analytics", analytics::router())
        .nest("/cms", cms::router())
}

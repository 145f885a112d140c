//! Tests for the browsable HTML dashboard layered over the JSON API.

mod common;

use axum::body::Body;
use axum::http::header::{ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE, VARY};
use axum::http::{Request, StatusCode};
use common::{body_json, body_text, get, get_html, post_json, post_json_auth, token_with_role};
use serde_json::json;
use sqlx::PgPool;

fn content_type(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_browser_gets_html_for_list_endpoint(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app.clone(),
        "/api/v1/cms/widgets",
        &staff,
        json!({ "name": "Homepage hero", "widget_type": "hero" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_html(app, "/api/v1/cms/widgets/active").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/html"));
    assert_eq!(response.headers().get(VARY).unwrap(), "Accept");

    let html = body_text(response).await;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Homepage hero"));
    assert!(html.contains(r#"data-theme="dark""#));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_format_query_forces_json(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_html(app.clone(), "/api/v1/cms/widgets/active?format=json").await;
    assert!(content_type(&response).starts_with("application/json"));
    let json = body_json(response).await;
    assert!(json["data"].is_array());

    let response = get(app, "/api/v1/cms/widgets/active?format=html").await;
    assert!(content_type(&response).starts_with("text/html"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_api_clients_keep_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .uri("/api/v1/cms/settings/public")
        .header(ACCEPT, "application/json")
        .body(Body::empty())
        .expect("valid request");
    let response = common::send(app, request).await;
    assert!(content_type(&response).starts_with("application/json"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_error_responses_render_with_status(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_html(app, "/api/v1/cms/pages/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(content_type(&response).starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("not found"));
    assert!(html.contains("NOT_FOUND"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_api_index_negotiates(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api").await;
    assert!(content_type(&response).starts_with("application/json"));
    let json = body_json(response).await;
    assert!(!json["data"].as_array().unwrap().is_empty());

    let response = get_html(app, "/api").await;
    assert!(content_type(&response).starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("API Dashboard"));
    assert!(html.contains(r#"href="/api/v1/content/videos?format=html""#));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_theme_cookie_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/theme", json!({ "theme": "light" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("theme=light"));
    assert!(cookie.contains("Max-Age=31536000"));

    let request = Request::builder()
        .uri("/api/v1/cms/widgets/active")
        .header(ACCEPT, "text/html")
        .header(COOKIE, "theme=light")
        .body(Body::empty())
        .expect("valid request");
    let html = body_text(common::send(app.clone(), request).await).await;
    assert!(html.contains(r#"data-theme="light""#));

    let response = post_json(app, "/api/theme", json!({ "theme": "neon" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

//! HTTP-level tests for categories, videos, posts and news.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, token_with_role};
use serde_json::{json, Value};
use sqlx::PgPool;

fn video(title: &str, platform: &str) -> Value {
    json!({
        "title": title,
        "platform": platform,
        "external_id": "abc123",
        "external_url": format!("https://{platform}.example/abc123"),
        "content_type": "finance_bill",
    })
}

fn post(title: &str, status: &str) -> Value {
    json!({
        "title": title,
        "post_type": "explainer",
        "status": status,
        "content": "word ".repeat(650),
    })
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_slug_is_generated_and_deduplicated(pool: PgPool) {
    let staff = token_with_role(&pool, "editor", "editor").await;
    let app = common::build_test_app(pool);

    let uri = "/api/v1/content/categories";
    let body = json!({ "name": "County Budgets" });
    let first = post_json_auth(app.clone(), uri, &staff, body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(body_json(first).await["data"]["slug"], "county-budgets");

    let second = post_json_auth(app.clone(), uri, &staff, body).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    assert_eq!(body_json(second).await["data"]["slug"], "county-budgets-2");

    // An explicit slug that is already taken is a conflict, not renamed.
    let explicit = json!({ "name": "Other", "slug": "county-budgets" });
    let response = post_json_auth(app, uri, &staff, explicit).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_categories_hidden_from_public(pool: PgPool) {
    let staff = token_with_role(&pool, "editor", "editor").await;
    let app = common::build_test_app(pool);

    for (name, active) in [("Health", true), ("Retired", false)] {
        let body = json!({ "name": name, "is_active": active });
        post_json_auth(app.clone(), "/api/v1/content/categories", &staff, body).await;
    }

    let json = body_json(get(app.clone(), "/api/v1/content/categories").await).await;
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["results"][0]["name"], "Health");
    assert_eq!(json["data"]["results"][0]["video_count"], 0);

    let json = body_json(get_auth(app, "/api/v1/content/categories", &staff).await).await;
    assert_eq!(json["data"]["count"], 2);
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_video_create_requires_staff_and_valid_platform(pool: PgPool) {
    let viewer = token_with_role(&pool, "viewer", "viewer").await;
    let staff = token_with_role(&pool, "editor", "editor").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/content/videos",
        &viewer,
        video("Finance Bill 101", "youtube"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/content/videos",
        &staff,
        video("Finance Bill 101", "myspace"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/content/videos",
        &staff,
        video("Finance Bill 101", "youtube"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "finance-bill-101");
    assert_eq!(
        json["data"]["thumbnail_url"],
        "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
    );
    assert!(json["data"]["embed_code"]
        .as_str()
        .unwrap()
        .contains("youtube.com/embed/abc123"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unpublished_video_hidden_from_public(pool: PgPool) {
    let staff = token_with_role(&pool, "editor", "editor").await;
    let app = common::build_test_app(pool);

    let mut draft = video("Hidden cut", "tiktok");
    draft["is_published"] = json!(false);
    let response = post_json_auth(app.clone(), "/api/v1/content/videos", &staff, draft).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    post_json_auth(
        app.clone(),
        "/api/v1/content/videos",
        &staff,
        video("Public cut", "tiktok"),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/content/videos").await).await;
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["results"][0]["title"], "Public cut");

    let uri = format!("/api/v1/content/videos/{id}");
    assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_auth(app, &uri, &staff).await.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_videos_by_platform_groups_every_platform(pool: PgPool) {
    let staff = token_with_role(&pool, "editor", "editor").await;
    let app = common::build_test_app(pool);

    post_json_auth(
        app.clone(),
        "/api/v1/content/videos",
        &staff,
        video("On TikTok", "tiktok"),
    )
    .await;

    let json = body_json(get(app, "/api/v1/content/videos/by-platform").await).await;
    let grouped = json["data"].as_object().unwrap();
    for platform in ["tiktok", "youtube", "x", "facebook", "instagram"] {
        assert!(grouped.contains_key(platform), "missing {platform}");
    }
    assert_eq!(grouped["tiktok"].as_array().unwrap().len(), 1);
    assert!(grouped["youtube"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_video_list_rejects_unknown_filter_choice(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/content/videos?platform=vine").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_post_read_time_and_view_count(pool: PgPool) {
    let staff = token_with_role(&pool, "writer", "editor").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/content/posts",
        &staff,
        post("Where the money went", "published"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "where-the-money-went");
    assert_eq!(json["data"]["read_time_minutes"], 3);
    assert!(json["data"]["published_at"].is_string());

    let uri = "/api/v1/content/posts/where-the-money-went";
    body_json(get(app.clone(), uri).await).await;
    let json = body_json(get(app, uri).await).await;
    assert_eq!(json["data"]["view_count"], 2);
    assert_eq!(json["data"]["author"]["username"], "writer");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_draft_posts_hidden_from_public(pool: PgPool) {
    let staff = token_with_role(&pool, "writer", "editor").await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/api/v1/content/posts", &staff, post("Draft", "draft")).await;
    post_json_auth(app.clone(), "/api/v1/content/posts", &staff, post("Live", "published")).await;

    let json = body_json(get(app.clone(), "/api/v1/content/posts").await).await;
    assert_eq!(json["data"]["count"], 1);

    let json = body_json(get_auth(app.clone(), "/api/v1/content/posts", &staff).await).await;
    assert_eq!(json["data"]["count"], 2);

    let response = get(app, "/api/v1/content/posts/draft").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "BlogPost 'draft' not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_post_delete_by_slug(pool: PgPool) {
    let staff = token_with_role(&pool, "writer", "editor").await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/api/v1/content/posts", &staff, post("Gone soon", "draft")).await;

    let uri = "/api/v1/content/posts/gone-soon";
    assert_eq!(delete_auth(app.clone(), uri, &staff).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(app, uri, &staff).await.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_breaking_news_lists_only_breaking_items(pool: PgPool) {
    let staff = token_with_role(&pool, "desk", "editor").await;
    let app = common::build_test_app(pool);

    for (title, breaking) in [("Budget tabled", true), ("Weekly roundup", false)] {
        let body = json!({ "title": title, "content": "Details", "is_breaking": breaking });
        let response = post_json_auth(app.clone(), "/api/v1/content/news", &staff, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app, "/api/v1/content/news/breaking").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Budget tabled");
    assert!(items[0]["time_since_published"].is_string());
}

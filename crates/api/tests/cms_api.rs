//! HTTP-level tests for pages, menus, settings, widgets and media.

mod common;

use std::io::Cursor;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth, token_with_role,
};
use serde_json::{json, Value};
use sqlx::PgPool;

fn page(title: &str, status: &str, show_in_nav: bool, nav_order: i32) -> Value {
    json!({
        "title": title,
        "content": "Budget facts for every citizen.",
        "status": status,
        "show_in_nav": show_in_nav,
        "nav_order": nav_order,
    })
}

async fn create(app: &axum::Router, uri: &str, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), uri, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_draft_pages_are_hidden_from_the_public(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);

    let about = create(
        &app,
        "/api/v1/cms/pages",
        &staff,
        page("About Us", "published", true, 2),
    )
    .await;
    assert_eq!(about["slug"], "about-us");
    assert_eq!(about["url"], "/page/about-us/");
    let draft = create(
        &app,
        "/api/v1/cms/pages",
        &staff,
        page("Upcoming", "draft", true, 1),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/cms/pages").await).await;
    assert_eq!(json["data"]["count"], 1);
    let json = body_json(get_auth(app.clone(), "/api/v1/cms/pages", &staff).await).await;
    assert_eq!(json["data"]["count"], 2);

    let draft_uri = format!("/api/v1/cms/pages/{}", draft["id"]);
    let response = get(app.clone(), &draft_uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get_auth(app.clone(), &draft_uri, &staff).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/cms/pages/published").await).await;
    assert_eq!(json["data"]["results"][0]["title"], "About Us");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_navigation_orders_published_nav_pages(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);

    for body in [
        page("Contact", "published", true, 3),
        page("Home", "published", true, 1),
        page("Privacy", "published", false, 0),
        page("Roadmap", "draft", true, 2),
    ] {
        create(&app, "/api/v1/cms/pages", &staff, body).await;
    }

    let json = body_json(get(app, "/api/v1/cms/pages/navigation").await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Home", "Contact"]);
    assert_eq!(json["data"][0]["url"], "/page/home/");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_page_writes_are_staff_only(pool: PgPool) {
    let viewer = token_with_role(&pool, "reader", "viewer").await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/cms/pages",
        &viewer,
        page("Hijack", "published", true, 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_menu_by_location_builds_item_tree(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);

    let about = create(
        &app,
        "/api/v1/cms/pages",
        &staff,
        page("About", "published", false, 0),
    )
    .await;
    let menu = create(
        &app,
        "/api/v1/cms/menus",
        &staff,
        json!({ "name": "Main Navigation", "location": "header" }),
    )
    .await;

    let parent = create(
        &app,
        "/api/v1/cms/menu-items",
        &staff,
        json!({ "menu_id": menu["id"], "title": "About", "page_id": about["id"] }),
    )
    .await;
    create(
        &app,
        "/api/v1/cms/menu-items",
        &staff,
        json!({
            "menu_id": menu["id"],
            "parent_id": parent["id"],
            "title": "Budget Tracker",
            "link_type": "url",
            "url": "https://tracker.example.org",
            "target_new_tab": true,
        }),
    )
    .await;
    create(
        &app,
        "/api/v1/cms/menu-items",
        &staff,
        json!({ "menu_id": menu["id"], "title": "Hidden", "link_type": "url",
                "url": "/hidden", "is_active": false }),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/cms/menus/by-location?location=header").await)
        .await;
    assert_eq!(json["data"]["name"], "Main Navigation");
    assert_eq!(json["data"]["item_count"], 2);
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["url"], "/page/about/");
    assert_eq!(items[0]["children"][0]["url"], "https://tracker.example.org");
    assert_eq!(items[0]["children"][0]["target_new_tab"], true);

    let response = get(app, "/api/v1/cms/menus/by-location?location=footer").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_menu_item_link_must_match_type(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);
    let menu = create(&app, "/api/v1/cms/menus", &staff, json!({ "name": "Footer" })).await;

    let response = post_json_auth(
        app,
        "/api/v1/cms/menu-items",
        &staff,
        json!({ "menu_id": menu["id"], "title": "Broken", "link_type": "url" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_are_typed_and_validated(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "admin").await;
    let app = common::build_test_app(pool);

    let setting = create(
        &app,
        "/api/v1/cms/settings",
        &staff,
        json!({ "key": "site.show_banner", "value": "true", "value_type": "boolean",
                "is_public": true }),
    )
    .await;
    assert_eq!(setting["typed_value"], true);
    create(
        &app,
        "/api/v1/cms/settings",
        &staff,
        json!({ "key": "analytics.sample_rate", "value": "0.5", "value_type": "number",
                "category": "analytics", "is_public": false }),
    )
    .await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cms/settings",
        &staff,
        json!({ "key": "site.max_items", "value": "many", "value_type": "number" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cms/settings",
        &staff,
        json!({ "key": "Bad Key", "value": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Changing only the type re-checks the stored value.
    let uri = format!("/api/v1/cms/settings/{}", setting["id"]);
    let response = put_json_auth(app.clone(), &uri, &staff, json!({ "value_type": "json" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response =
        put_json_auth(app.clone(), &uri, &staff, json!({ "value_type": "number" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(app.clone(), "/api/v1/cms/settings/public").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["key"], "site.show_banner");

    let uri = "/api/v1/cms/settings/by-category?category=analytics";
    let json = body_json(get(app.clone(), uri).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    let json = body_json(get_auth(app, uri, &staff).await).await;
    assert_eq!(json["data"][0]["typed_value"], 0.5);
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_active_widgets_by_type(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);

    let widgets = [
        json!({ "name": "Homepage hero", "widget_type": "hero" }),
        json!({ "name": "Old hero", "widget_type": "hero", "is_active": false }),
        json!({ "name": "Signup", "widget_type": "newsletter" }),
    ];
    for widget in widgets {
        create(&app, "/api/v1/cms/widgets", &staff, widget).await;
    }

    let json = body_json(get(app.clone(), "/api/v1/cms/widgets/active").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app.clone(), "/api/v1/cms/widgets/by-type?type=hero").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Homepage hero");

    let response = get(app.clone(), "/api/v1/cms/widgets/by-type").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = get(app, "/api/v1/cms/widgets/by-type?type=carousel").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "bns-test-boundary";

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

fn multipart_body(filename: &str, data: &[u8], fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(token: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/cms/media")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_media_upload_stores_file_and_dimensions(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let config = common::test_config();
    let media_root = config.media_root.clone();
    let app = common::build_test_app_with(pool, config);

    let body = multipart_body(
        "County Map.png",
        &png(40, 25),
        &[("title", "County map"), ("folder", "maps/2025")],
    );
    let response = common::send(app.clone(), upload_request(&staff, body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let item = &json["data"];
    assert_eq!(item["media_type"], "image");
    assert_eq!(item["width"], 40);
    assert_eq!(item["height"], 25);
    assert_eq!(item["folder"], "maps/2025");
    assert_eq!(item["title"], "County map");

    let file_path = item["file_path"].as_str().unwrap();
    assert!(media_root.join(file_path).exists());
    assert_eq!(item["url"], format!("/media/{file_path}"));

    let json = body_json(
        get_auth(app.clone(), "/api/v1/cms/media/by-folder?folder=maps/2025", &staff).await,
    )
    .await;
    assert_eq!(json["data"]["count"], 1);
    let json =
        body_json(get_auth(app.clone(), "/api/v1/cms/media/by-type?type=image", &staff).await)
            .await;
    assert_eq!(json["data"]["count"], 1);

    let uri = format!("/api/v1/cms/media/{}", item["id"]);
    let response = delete_auth(app.clone(), &uri, &staff).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!media_root.join(file_path).exists());
    let response = get_auth(app, &uri, &staff).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

fn stored_files(dir: &std::path::Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                stored_files(&path)
            } else {
                1
            }
        })
        .sum()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_media_insert_leaves_no_file(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    // The token outlives its user, so the uploader reference is dangling.
    sqlx::query("DELETE FROM users").execute(&pool).await.unwrap();
    let config = common::test_config();
    let media_root = config.media_root.clone();
    let app = common::build_test_app_with(pool, config);

    let body = multipart_body("orphan.png", &png(4, 4), &[]);
    let response = common::send(app, upload_request(&staff, body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");
    assert_eq!(stored_files(&media_root), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_media_upload_rejects_non_array_tags(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);
    let body = multipart_body("a.png", &png(2, 2), &[("tags", r#"{"a": 1}"#)]);
    let response = common::send(app, upload_request(&staff, body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_media_upload_requires_a_file(pool: PgPool) {
    let staff = token_with_role(&pool, "webmaster", "editor").await;
    let app = common::build_test_app(pool);

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nNo file\r\n\
         --{BOUNDARY}--\r\n"
    );
    let response = common::send(app, upload_request(&staff, body.into_bytes())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_media_library_is_staff_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/cms/media").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

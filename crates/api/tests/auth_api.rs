//! HTTP-level integration tests for login, refresh, logout and `me`.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, create_user, get, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;

/// Log in via the API and return the JSON body.
async fn login(app: axum::Router, email: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success_returns_tokens_and_cookie(pool: PgPool) {
    let user = create_user(&pool, "loginuser", "editor").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "loginuser@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login sets the dashboard cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("bns_access="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "editor");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_email_is_case_insensitive(pool: PgPool) {
    create_user(&pool, "casey", "viewer").await;
    let app = common::build_test_app(pool);

    let json = login(app, "CASEY@Example.com").await;
    assert_eq!(json["user"]["username"], "casey");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_is_401(pool: PgPool) {
    create_user(&pool, "wrongpw", "viewer").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "wrongpw@example.com", "password": "not-it-at-all" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_user_is_403(pool: PgPool) {
    let user = create_user(&pool, "inactive", "viewer").await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "inactive@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_account_locks_after_repeated_failures(pool: PgPool) {
    create_user(&pool, "locked", "viewer").await;
    let app = common::build_test_app(pool);

    let wrong = serde_json::json!({ "email": "locked@example.com", "password": "nope-nope" });
    for _ in 0..5 {
        let response = post_json(app.clone(), "/api/v1/auth/login", wrong.clone()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while the lock holds.
    let right = serde_json::json!({ "email": "locked@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", right).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_the_token(pool: PgPool) {
    create_user(&pool, "refresher", "viewer").await;
    let app = common::build_test_app(pool);

    let first = login(app.clone(), "refresher@example.com").await;
    let old_refresh = first["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": old_refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_ne!(second["refresh_token"], first["refresh_token"]);

    // The old refresh token was revoked by the rotation.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": old_refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions_and_clears_cookie(pool: PgPool) {
    create_user(&pool, "leaver", "viewer").await;
    let app = common::build_test_app(pool);

    let json = login(app.clone(), "leaver@example.com").await;
    let access = json["access_token"].as_str().unwrap();
    let refresh = json["refresh_token"].as_str().unwrap();

    let response =
        post_json_auth(app.clone(), "/api/v1/auth/logout", access, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("bns_access=;") || cookie.starts_with("bns_access=\"\""));

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_accepts_bearer_and_cookie(pool: PgPool) {
    let user = create_user(&pool, "whoami", "donor").await;
    let token = common::token_for(&user);
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["username"], "whoami");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/me")
        .header(COOKIE, format!("theme=light; bns_access={token}"))
        .body(Body::empty())
        .unwrap();
    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], user.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_without_credentials_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

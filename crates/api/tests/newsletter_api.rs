//! HTTP-level tests for double opt-in subscriptions, campaign status
//! transitions and email tracking.

mod common;

use axum::http::StatusCode;
use bns_db::repositories::SubscriberRepo;
use common::{body_json, get_auth, post_json, post_json_auth, put_json_auth, token_with_role};
use serde_json::json;
use sqlx::PgPool;

const SUBSCRIBERS: &str = "/api/v1/newsletter/subscribers";

async fn confirmation_token(pool: &PgPool, email: &str) -> String {
    SubscriberRepo::find_by_email(pool, email)
        .await
        .unwrap()
        .expect("subscriber exists")
        .confirmation_token
        .expect("pending subscribers carry a token")
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_double_opt_in_flow(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        SUBSCRIBERS,
        json!({ "email": "  Reader@Example.com ", "first_name": "Otieno" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await["data"]["message"],
        "Please check your email to confirm subscription"
    );

    // A second request while pending only resends the confirmation.
    let response =
        post_json(app.clone(), SUBSCRIBERS, json!({ "email": "reader@example.com" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["message"], "Confirmation email resent");

    let token = confirmation_token(&pool, "reader@example.com").await;
    let confirm = format!("{SUBSCRIBERS}/confirm");
    let response = post_json(app.clone(), &confirm, json!({ "token": token })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["message"], "Subscription confirmed!");

    // Confirming twice is rejected.
    let response = post_json(app.clone(), &confirm, json!({ "token": token })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Already active.
    let response = post_json(app, SUBSCRIBERS, json!({ "email": "reader@example.com" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_confirm_requires_known_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let confirm = format!("{SUBSCRIBERS}/confirm");

    let response = post_json(app.clone(), &confirm, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Token required");

    let response = post_json(app, &confirm, json!({ "token": "no-such-token" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid token");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unsubscribe_is_idempotent_and_allows_resubscribe(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app.clone(), SUBSCRIBERS, json!({ "email": "leaving@example.com" })).await;

    let unsubscribe = format!("{SUBSCRIBERS}/unsubscribe");
    let body = json!({ "email": "leaving@example.com", "reason": "too many emails" });
    for _ in 0..2 {
        let response = post_json(app.clone(), &unsubscribe, body.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let subscriber = SubscriberRepo::find_by_email(&pool, "leaving@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subscriber.status, "unsubscribed");
    assert_eq!(subscriber.unsubscribe_reason, "too many emails");
    let old_token = subscriber.confirmation_token;

    // Coming back restarts the opt-in with a fresh token.
    let response =
        post_json(app.clone(), SUBSCRIBERS, json!({ "email": "leaving@example.com" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let subscriber = SubscriberRepo::find_by_email(&pool, "leaving@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subscriber.status, "pending");
    assert_ne!(subscriber.confirmation_token, old_token);

    let response =
        post_json(app, &unsubscribe, json!({ "email": "stranger@example.com" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, SUBSCRIBERS, json!({ "email": "not-an-email" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscriber_list_is_staff_only(pool: PgPool) {
    let viewer = token_with_role(&pool, "curious", "viewer").await;
    let staff = token_with_role(&pool, "comms", "editor").await;
    let app = common::build_test_app(pool);
    post_json(app.clone(), SUBSCRIBERS, json!({ "email": "a@example.com" })).await;

    let response = get_auth(app.clone(), SUBSCRIBERS, &viewer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(app, SUBSCRIBERS, &staff).await).await;
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["results"][0]["open_rate"], 0.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_staff_update_respects_opt_in(pool: PgPool) {
    let staff = token_with_role(&pool, "comms", "editor").await;
    let app = common::build_test_app(pool.clone());
    post_json(app.clone(), SUBSCRIBERS, json!({ "email": "waiting@example.com" })).await;
    let subscriber = SubscriberRepo::find_by_email(&pool, "waiting@example.com")
        .await
        .unwrap()
        .unwrap();
    let uri = format!("{SUBSCRIBERS}/{}", subscriber.id);

    // Activation only happens through the confirmation link.
    let response =
        put_json_auth(app.clone(), &uri, &staff, json!({ "status": "active" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response =
        put_json_auth(app.clone(), &uri, &staff, json!({ "status": "bounced" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        &uri,
        &staff,
        json!({ "status": "unsubscribed", "first_name": "Wanjiru" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "unsubscribed");
    assert_eq!(json["data"]["first_name"], "Wanjiru");
    assert!(json["data"]["confirmed_at"].is_null());
    let unsubscribed_at = json["data"]["unsubscribed_at"].clone();
    assert!(unsubscribed_at.is_string());

    // Re-sending the same status keeps the original timestamp.
    let response =
        put_json_auth(app, &uri, &staff, json!({ "status": "unsubscribed" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["unsubscribed_at"], unsubscribed_at);
}

// ---------------------------------------------------------------------------
// Campaigns and email logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_campaign_send_and_tracking(pool: PgPool) {
    let staff = token_with_role(&pool, "comms", "editor").await;
    let app = common::build_test_app(pool.clone());

    post_json(app.clone(), SUBSCRIBERS, json!({ "email": "fan@example.com" })).await;
    let subscriber_id = SubscriberRepo::find_by_email(&pool, "fan@example.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/newsletter/campaigns",
        &staff,
        json!({
            "name": "Week 12",
            "subject": "Your weekly budget digest",
            "campaign_type": "weekly_digest",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let campaign = body_json(response).await;
    assert_eq!(campaign["data"]["status"], "draft");
    let campaign_id = campaign["data"]["id"].as_i64().unwrap();

    // mark-sent is only valid once the campaign is queued.
    let mark_sent = format!("/api/v1/newsletter/campaigns/{campaign_id}/mark-sent");
    let response = post_json_auth(app.clone(), &mark_sent, &staff, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let send = format!("/api/v1/newsletter/campaigns/{campaign_id}/send");
    let response = post_json_auth(app.clone(), &send, &staff, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "scheduled");

    let response = post_json_auth(app.clone(), &send, &staff, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(app.clone(), &mark_sent, &staff, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "sent");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/newsletter/email-logs",
        &staff,
        json!({ "campaign_id": campaign_id, "subscriber_id": subscriber_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let log = body_json(response).await;
    assert_eq!(log["data"]["status"], "sent");
    let log_id = log["data"]["id"].as_i64().unwrap();

    // Tracking is public; repeated opens count once.
    let opened = format!("/api/v1/newsletter/email-logs/{log_id}/opened");
    for _ in 0..2 {
        let response = post_json(app.clone(), &opened, json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let clicked = format!("/api/v1/newsletter/email-logs/{log_id}/clicked");
    let response =
        post_json(app.clone(), &clicked, json!({ "url": "https://budgetndiostory.org/x" })).await;
    assert_eq!(body_json(response).await["data"]["status"], "clicked");

    let subscriber = SubscriberRepo::find_by_id(&pool, subscriber_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subscriber.emails_sent, 1);
    assert_eq!(subscriber.emails_opened, 1);
    assert_eq!(subscriber.emails_clicked, 1);

    let response = get_auth(
        app,
        &format!("/api/v1/newsletter/campaigns/{campaign_id}"),
        &staff,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["open_count"], 1);
    assert_eq!(json["data"]["click_to_open_rate"], 100.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_tracking_unknown_log_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/newsletter/email-logs/999/opened", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

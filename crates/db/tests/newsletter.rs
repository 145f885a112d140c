//! Integration tests for subscribers, campaigns and email-log tracking.

use bns_db::models::campaign::CreateCampaign;
use bns_db::models::category::CreateCategory;
use bns_db::models::email_log::RecordSend;
use bns_db::models::subscriber::{CreateSubscriber, Subscriber, SubscriberQuery};
use bns_db::repositories::{CampaignRepo, CategoryRepo, EmailLogRepo, SubscriberRepo};
use sqlx::PgPool;

fn new_subscriber(email: &str, token: &str) -> CreateSubscriber {
    CreateSubscriber {
        email: email.to_string(),
        first_name: "Wanjiru".to_string(),
        last_name: String::new(),
        content_preference: "all".to_string(),
        source: "footer".to_string(),
        ip_address: None,
        user_agent: String::new(),
        confirmation_token: token.to_string(),
    }
}

fn new_campaign(name: &str) -> CreateCampaign {
    CreateCampaign {
        name: name.to_string(),
        subject: "This week in the budget".to_string(),
        preheader: None,
        campaign_type: "weekly_digest".to_string(),
        html_content: None,
        text_content: None,
        featured_video_id: None,
        target_preferences: None,
        scheduled_at: None,
        sponsored_by_id: None,
        featured_post_ids: Vec::new(),
        target_category_ids: Vec::new(),
    }
}

async fn sent_log(pool: &PgPool) -> (Subscriber, i64, i64) {
    let subscriber = SubscriberRepo::create(pool, &new_subscriber("reader@example.com", "tok"), &[])
        .await
        .unwrap();
    let campaign = CampaignRepo::create(pool, &new_campaign("Digest")).await.unwrap();
    let log = EmailLogRepo::record_send(
        pool,
        &RecordSend {
            campaign_id: campaign.id,
            subscriber_id: subscriber.id,
            message_id: None,
        },
    )
    .await
    .unwrap();
    (subscriber, campaign.id, log.id)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subscriber_double_opt_in(pool: PgPool) {
    let created = SubscriberRepo::create(&pool, &new_subscriber("new@example.com", "t-1"), &[])
        .await
        .unwrap();
    assert_eq!(created.status, "pending");

    let found = SubscriberRepo::find_by_token(&pool, "t-1").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    let confirmed = SubscriberRepo::confirm(&pool, created.id).await.unwrap();
    assert_eq!(confirmed.status, "active");
    assert!(confirmed.confirmed_at.is_some());
    assert!(confirmed.subscribed_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unsubscribe_then_resubscribe(pool: PgPool) {
    let created = SubscriberRepo::create(&pool, &new_subscriber("gone@example.com", "t-2"), &[])
        .await
        .unwrap();
    let gone = SubscriberRepo::unsubscribe(&pool, created.id, "too many emails")
        .await
        .unwrap();
    assert_eq!(gone.status, "unsubscribed");
    assert_eq!(gone.unsubscribe_reason, "too many emails");
    assert!(gone.unsubscribed_at.is_some());

    let back = SubscriberRepo::resubscribe(&pool, created.id, "t-3").await.unwrap();
    assert_eq!(back.status, "pending");
    assert!(back.unsubscribed_at.is_none());
    assert!(SubscriberRepo::find_by_token(&pool, "t-3").await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subscriber_categories_are_linked(pool: PgPool) {
    let category = CategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "Agriculture".to_string(),
            slug: None,
            description: None,
            color: None,
            icon: None,
            sort_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap();
    let subscriber = SubscriberRepo::create(
        &pool,
        &new_subscriber("farm@example.com", "t-4"),
        &[category.id],
    )
    .await
    .unwrap();

    let linked = CategoryRepo::for_subscriber(&pool, subscriber.id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].slug, "agriculture");

    let filter = SubscriberQuery {
        status: Some("pending".to_string()),
        ..Default::default()
    };
    assert_eq!(SubscriberRepo::count(&pool, &filter, None).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_campaign_send_lifecycle(pool: PgPool) {
    let campaign = CampaignRepo::create(&pool, &new_campaign("Lifecycle")).await.unwrap();
    assert_eq!(campaign.status, "draft");

    let scheduled = CampaignRepo::mark_scheduled(&pool, campaign.id).await.unwrap();
    assert_eq!(scheduled.status, "scheduled");
    assert!(scheduled.scheduled_at.is_some());

    let sent = CampaignRepo::mark_sent(&pool, campaign.id).await.unwrap();
    assert_eq!(sent.status, "sent");
    assert!(sent.sent_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_record_send_bumps_counters(pool: PgPool) {
    let (subscriber, campaign_id, _) = sent_log(&pool).await;

    let subscriber = SubscriberRepo::find_by_id(&pool, subscriber.id).await.unwrap().unwrap();
    assert_eq!(subscriber.emails_sent, 1);
    let campaign = CampaignRepo::find_by_id(&pool, campaign_id).await.unwrap().unwrap();
    assert_eq!(campaign.total_recipients, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repeat_opens_count_once(pool: PgPool) {
    let (subscriber, campaign_id, log_id) = sent_log(&pool).await;

    let first = EmailLogRepo::track_open(&pool, log_id).await.unwrap().unwrap();
    let second = EmailLogRepo::track_open(&pool, log_id).await.unwrap().unwrap();
    assert_eq!(first.opened_at, second.opened_at);

    let subscriber = SubscriberRepo::find_by_id(&pool, subscriber.id).await.unwrap().unwrap();
    assert_eq!(subscriber.emails_opened, 1);
    assert!(subscriber.last_opened_at.is_some());
    let campaign = CampaignRepo::find_by_id(&pool, campaign_id).await.unwrap().unwrap();
    assert_eq!(campaign.open_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_every_click_is_recorded_but_counted_once(pool: PgPool) {
    let (subscriber, campaign_id, log_id) = sent_log(&pool).await;

    EmailLogRepo::track_click(&pool, log_id, "https://budgetndiostory.org/a")
        .await
        .unwrap();
    let log = EmailLogRepo::track_click(&pool, log_id, "https://budgetndiostory.org/b")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        log.clicked_links,
        serde_json::json!(["https://budgetndiostory.org/a", "https://budgetndiostory.org/b"])
    );
    assert_eq!(bns_core::newsletter::email_log_status(&log.milestones()), "clicked");

    let subscriber = SubscriberRepo::find_by_id(&pool, subscriber.id).await.unwrap().unwrap();
    assert_eq!(subscriber.emails_clicked, 1);
    let campaign = CampaignRepo::find_by_id(&pool, campaign_id).await.unwrap().unwrap();
    assert_eq!(campaign.click_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tracking_unknown_log_returns_none(pool: PgPool) {
    assert!(EmailLogRepo::track_open(&pool, 999).await.unwrap().is_none());
    assert!(EmailLogRepo::track_click(&pool, 999, "https://x.test")
        .await
        .unwrap()
        .is_none());
}

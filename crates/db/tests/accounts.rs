//! Integration tests for users, sessions and donor/sponsor profiles.

use bns_db::models::donor_profile::CreateDonorProfile;
use bns_db::models::session::CreateSession;
use bns_db::models::sponsor_profile::CreateSponsorProfile;
use bns_db::models::user::{CreateUser, UpdateUser, UserQuery};
use bns_db::repositories::{DonorProfileRepo, SessionRepo, SponsorProfileRepo, UserRepo};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn new_user(username: &str, role: &str) -> CreateUser {
    CreateUser {
        email: format!("{username}@example.com"),
        username: username.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        first_name: "Amina".to_string(),
        last_name: "Otieno".to_string(),
        role: role.to_string(),
        phone: String::new(),
        organization: String::new(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_lookup_is_case_insensitive_on_email(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("amina", "viewer")).await.unwrap();

    let found = UserRepo::find_by_email(&pool, "AMINA@Example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.full_name(), "Amina Otieno");
    assert!(found.is_active);
    assert_eq!(found.failed_login_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_is_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dup", "viewer")).await.unwrap();
    let mut again = new_user("dup", "viewer");
    again.email = "other@example.com".to_string();

    let err = UserRepo::create(&pool, &again).await.unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert!(db_err.constraint().unwrap().starts_with("uq_"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_list_filters_by_role_and_search(pool: PgPool) {
    UserRepo::create(&pool, &new_user("writer1", "editor")).await.unwrap();
    UserRepo::create(&pool, &new_user("reader1", "viewer")).await.unwrap();
    UserRepo::create(&pool, &new_user("reader2", "viewer")).await.unwrap();

    let readers = UserQuery {
        role: Some("viewer".to_string()),
        search: None,
    };
    assert_eq!(UserRepo::count(&pool, &readers, None).await.unwrap(), 2);

    let all = UserQuery::default();
    let hits = UserRepo::list(&pool, &all, Some("%writer%"), 20, 0).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].username, "writer1");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_only_touches_given_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("partial", "viewer")).await.unwrap();
    let update = UpdateUser {
        bio: Some("Budget tracker".to_string()),
        ..Default::default()
    };

    let updated = UserRepo::update(&pool, user.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.bio, "Budget tracker");
    assert_eq!(updated.first_name, "Amina");
    assert_eq!(updated.role, "viewer");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_logins_accumulate_until_success(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("locky", "viewer")).await.unwrap();

    for expected in 1..=3 {
        let count = UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
        assert_eq!(count, expected);
    }
    UserRepo::lock_account(&pool, user.id, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();
    let locked = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(locked.locked_until.is_some());

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let reset = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reset.failed_login_count, 0);
    assert!(reset.locked_until.is_none());
    assert!(reset.last_login_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_revoked_sessions_are_not_found(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("sess", "viewer")).await.unwrap();
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "abc123".to_string(),
            expires_at: Utc::now() + Duration::days(7),
            user_agent: None,
            ip_address: None,
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "abc123")
        .await
        .unwrap()
        .is_some());
    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "abc123")
        .await
        .unwrap()
        .is_none());
    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_sessions_are_not_found(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("old", "viewer")).await.unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "stale".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
            user_agent: Some("curl/8".to_string()),
            ip_address: Some("127.0.0.1".to_string()),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "stale")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_donor_totals_round_trip_under_lock(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("donor", "donor")).await.unwrap();
    let donor = DonorProfileRepo::create(
        &pool,
        &CreateDonorProfile {
            user_id: user.id,
            donor_type: None,
            tax_id: None,
            billing_address: None,
            is_recurring_donor: None,
            preferred_payment_method: Some("mpesa".to_string()),
            communication_preferences: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(donor.donor_type, "individual");
    assert_eq!(donor.total_donated, Decimal::ZERO);

    let today = Utc::now().date_naive();
    let mut tx = pool.begin().await.unwrap();
    let totals = DonorProfileRepo::lock_totals(&mut *tx, donor.id)
        .await
        .unwrap()
        .unwrap();
    let next = totals.record(Decimal::new(250_000, 2), today).unwrap();
    DonorProfileRepo::save_totals(&mut *tx, donor.id, &next).await.unwrap();
    tx.commit().await.unwrap();

    let saved = DonorProfileRepo::find_by_id(&pool, donor.id).await.unwrap().unwrap();
    assert_eq!(saved.total_donated, Decimal::new(250_000, 2));
    assert_eq!(saved.donation_count, 1);
    assert_eq!(saved.first_donation_date, Some(today));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sponsor_totals_count_active_sponsors(pool: PgPool) {
    let gold = UserRepo::create(&pool, &new_user("gold", "sponsor")).await.unwrap();
    let lapsed = UserRepo::create(&pool, &new_user("lapsed", "sponsor")).await.unwrap();
    let sponsors = [
        (gold, "gold", true, 500_000),
        (lapsed, "bronze", false, 50_000),
    ];
    for (user, level, active, value) in sponsors {
        SponsorProfileRepo::create(
            &pool,
            &CreateSponsorProfile {
                user_id: user.id,
                company_name: format!("{} Ltd", user.username),
                logo_url: None,
                website: None,
                level: Some(level.to_string()),
                contract_value: Some(Decimal::new(value, 0)),
                contract_start: None,
                contract_end: None,
                benefits_claimed: None,
                brand_visibility_slots: None,
                dedicated_content_pieces: Some(4),
                event_sponsorships: None,
                account_manager_id: None,
                is_active: Some(active),
            },
        )
        .await
        .unwrap();
    }

    let (total, active, _value) = SponsorProfileRepo::totals(&pool).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(active, 1);

    let top = SponsorProfileRepo::top(&pool, 5).await.unwrap();
    assert_eq!(top[0].company_name, "gold Ltd");
}

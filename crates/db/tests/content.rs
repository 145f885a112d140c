//! Integration tests for categories, videos and blog posts.

use bns_db::models::blog_post::{CreateBlogPost, PostQuery, UpdateBlogPost};
use bns_db::models::category::CreateCategory;
use bns_db::models::video::{CreateVideo, UpdateVideo, VideoQuery};
use bns_db::repositories::video_repo::DEFAULT_ORDER;
use bns_db::repositories::{BlogPostRepo, CategoryRepo, VideoRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: None,
        description: None,
        color: None,
        icon: None,
        sort_order: None,
        is_active: None,
    }
}

fn new_video(title: &str, external_id: &str, published: bool) -> CreateVideo {
    CreateVideo {
        title: title.to_string(),
        slug: None,
        description: None,
        platform: "youtube".to_string(),
        external_id: external_id.to_string(),
        external_url: format!("https://www.youtube.com/watch?v={external_id}"),
        embed_url: None,
        thumbnail_url: None,
        content_type: "finance_bill".to_string(),
        duration_seconds: Some(95),
        is_featured: None,
        is_published: Some(published),
        published_at: None,
        display_order: None,
        playlist_id: None,
        sponsored_by_id: None,
        category_ids: Vec::new(),
    }
}

fn new_post(title: &str, content: &str, status: Option<&str>) -> CreateBlogPost {
    CreateBlogPost {
        title: title.to_string(),
        slug: None,
        excerpt: None,
        content: Some(content.to_string()),
        content_html: None,
        post_type: "explainer".to_string(),
        tags: None,
        featured_image_url: None,
        featured_image_caption: None,
        status: status.map(str::to_string),
        published_at: None,
        scheduled_publish_at: None,
        allow_comments: None,
        meta_title: None,
        meta_description: None,
        sponsored_by_id: None,
        category_ids: Vec::new(),
        co_author_ids: Vec::new(),
        related_video_ids: Vec::new(),
        related_post_ids: Vec::new(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_slug_gets_numeric_suffix(pool: PgPool) {
    let first = CategoryRepo::create(&pool, &new_category("County Budgets")).await.unwrap();
    let second = CategoryRepo::create(&pool, &new_category("County Budgets")).await.unwrap();

    assert_eq!(first.slug, "county-budgets");
    assert_eq!(second.slug, "county-budgets-2");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_long_titles_get_distinct_slugs(pool: PgPool) {
    let title = "Understanding the County Budget Allocation Process in Kenya Today";
    let mut slugs = Vec::new();
    for _ in 0..3 {
        let post = BlogPostRepo::create(&pool, None, &new_post(title, "body", None)).await.unwrap();
        assert!(post.slug.len() <= 50);
        slugs.push(post.slug);
    }
    assert!(slugs[1].ends_with("-2"));
    assert!(slugs[2].ends_with("-3"));
    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_counts_only_published_content(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Health")).await.unwrap();

    let mut live = new_video("Live", "live1", true);
    live.category_ids = vec![category.id];
    VideoRepo::create(&pool, None, &live).await.unwrap();
    let mut hidden = new_video("Hidden", "hidden1", false);
    hidden.category_ids = vec![category.id];
    VideoRepo::create(&pool, None, &hidden).await.unwrap();

    let mut draft = new_post("Draft", "words", None);
    draft.category_ids = vec![category.id];
    BlogPostRepo::create(&pool, None, &draft).await.unwrap();

    let counted = CategoryRepo::find_by_id(&pool, category.id, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(counted.video_count, 1);
    assert_eq!(counted.post_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_video_list_hides_unpublished_and_future(pool: PgPool) {
    VideoRepo::create(&pool, None, &new_video("Now", "a1", true)).await.unwrap();
    VideoRepo::create(&pool, None, &new_video("Hidden", "a2", false)).await.unwrap();
    let mut future = new_video("Later", "a3", true);
    future.published_at = Some(Utc::now() + Duration::days(2));
    VideoRepo::create(&pool, None, &future).await.unwrap();

    let filter = VideoQuery::default();
    let public = VideoRepo::list(&pool, true, &filter, None, DEFAULT_ORDER, 20, 0)
        .await
        .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].title, "Now");
    assert_eq!(VideoRepo::count(&pool, false, &filter, None).await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_video_list_filters_by_category_slug(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Education")).await.unwrap();
    let mut tagged = new_video("Tagged", "b1", true);
    tagged.category_ids = vec![category.id];
    VideoRepo::create(&pool, None, &tagged).await.unwrap();
    VideoRepo::create(&pool, None, &new_video("Untagged", "b2", true)).await.unwrap();

    let filter = VideoQuery {
        category: Some("education".to_string()),
        ..Default::default()
    };
    let hits = VideoRepo::list(&pool, true, &filter, None, DEFAULT_ORDER, 20, 0)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug, "tagged");
    assert_eq!(CategoryRepo::for_video(&pool, hits[0].id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_video_metrics_update_stamps_timestamp(pool: PgPool) {
    let video = VideoRepo::create(&pool, None, &new_video("Metrics", "m1", true))
        .await
        .unwrap();
    assert!(video.last_metrics_update.is_none());

    let retitled = VideoRepo::update(
        &pool,
        video.id,
        &UpdateVideo {
            title: Some("Renamed".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(retitled.last_metrics_update.is_none());

    let counted = VideoRepo::update(
        &pool,
        video.id,
        &UpdateVideo {
            view_count: Some(1200),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(counted.view_count, 1200);
    assert!(counted.last_metrics_update.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_post_read_time_tracks_content(pool: PgPool) {
    let words = "budget ".repeat(450);
    let post = BlogPostRepo::create(&pool, None, &new_post("Long read", &words, None))
        .await
        .unwrap();
    assert_eq!(post.read_time_minutes, 2);
    assert_eq!(post.status, "draft");
    assert!(post.published_at.is_none());

    let updated = BlogPostRepo::update(
        &pool,
        &post.slug,
        &UpdateBlogPost {
            content: Some("short".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.read_time_minutes, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_published_post_gets_publish_time(pool: PgPool) {
    let post = BlogPostRepo::create(&pool, None, &new_post("Out now", "text", Some("published")))
        .await
        .unwrap();
    assert!(post.published_at.is_some());

    assert!(BlogPostRepo::find_by_slug(&pool, "out-now", true)
        .await
        .unwrap()
        .is_some());
    assert_eq!(BlogPostRepo::increment_view_count(&pool, post.id).await.unwrap(), 1);
    assert_eq!(BlogPostRepo::increment_view_count(&pool, post.id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_drafts_hidden_from_public_lookups(pool: PgPool) {
    BlogPostRepo::create(&pool, None, &new_post("Secret", "text", None))
        .await
        .unwrap();

    assert!(BlogPostRepo::find_by_slug(&pool, "secret", true)
        .await
        .unwrap()
        .is_none());
    assert!(BlogPostRepo::find_by_slug(&pool, "secret", false)
        .await
        .unwrap()
        .is_some());
    let filter = PostQuery::default();
    assert_eq!(
        BlogPostRepo::count(&pool, Some("published"), &filter, None).await.unwrap(),
        0
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_related_posts_only_list_published(pool: PgPool) {
    let input = new_post("Related A", "x", Some("published"));
    let published = BlogPostRepo::create(&pool, None, &input).await.unwrap();
    let draft = BlogPostRepo::create(&pool, None, &new_post("Related B", "x", None))
        .await
        .unwrap();
    let mut main = new_post("Main", "x", Some("published"));
    main.related_post_ids = vec![published.id, draft.id];
    let main = BlogPostRepo::create(&pool, None, &main).await.unwrap();

    let related = BlogPostRepo::related(&pool, main.id, 3).await.unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, published.id);
}

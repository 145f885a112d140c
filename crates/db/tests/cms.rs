//! Integration tests for pages, menus and site settings.

use bns_core::cms::{build_menu_tree, resolve_menu_url, MenuNode};
use bns_db::models::menu::{CreateMenu, CreateMenuItem};
use bns_db::models::page::CreatePage;
use bns_db::models::site_setting::CreateSiteSetting;
use bns_db::repositories::{MenuRepo, PageRepo, SiteSettingRepo};
use sqlx::PgPool;

fn new_page(title: &str, status: Option<&str>, show_in_nav: bool) -> CreatePage {
    CreatePage {
        title: title.to_string(),
        slug: None,
        subtitle: None,
        content: None,
        content_html: None,
        template: None,
        meta_title: None,
        meta_description: None,
        featured_image_url: None,
        video_url: None,
        status: status.map(str::to_string),
        is_featured: None,
        show_in_nav: Some(show_in_nav),
        nav_order: None,
        show_sidebar: None,
        show_comments: None,
        full_width: None,
        background_color: None,
        background_image_url: None,
        published_at: None,
    }
}

fn new_item(menu_id: i64, title: &str) -> CreateMenuItem {
    CreateMenuItem {
        menu_id,
        parent_id: None,
        title: title.to_string(),
        link_type: None,
        page_id: None,
        url: None,
        category_id: None,
        icon: None,
        css_class: None,
        target_new_tab: None,
        sort_order: None,
        is_active: None,
    }
}

fn new_setting(key: &str, is_public: bool) -> CreateSiteSetting {
    CreateSiteSetting {
        key: key.to_string(),
        value: "on".to_string(),
        value_type: None,
        category: None,
        description: None,
        is_public: Some(is_public),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_navigation_lists_published_nav_pages(pool: PgPool) {
    let about = PageRepo::create(&pool, None, &new_page("About Us", Some("published"), true))
        .await
        .unwrap();
    PageRepo::create(&pool, None, &new_page("Draft Nav", None, true))
        .await
        .unwrap();
    PageRepo::create(&pool, None, &new_page("Hidden", Some("published"), false))
        .await
        .unwrap();

    assert_eq!(about.slug, "about-us");
    assert!(about.published_at.is_some());

    let nav = PageRepo::navigation(&pool).await.unwrap();
    assert_eq!(nav.len(), 1);
    assert_eq!(nav[0].slug, "about-us");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_menu_defaults_and_location_lookup(pool: PgPool) {
    let menu = MenuRepo::create(
        &pool,
        &CreateMenu {
            name: "Main Menu".to_string(),
            slug: None,
            description: None,
            location: None,
            is_active: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(menu.slug, "main-menu");
    assert_eq!(menu.location, "header");

    let found = MenuRepo::find_by_location(&pool, "header").await.unwrap().unwrap();
    assert_eq!(found.menu.id, menu.id);
    assert_eq!(found.item_count, 0);
    assert!(MenuRepo::find_by_location(&pool, "footer").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_active_links_resolve_into_a_tree(pool: PgPool) {
    let page = PageRepo::create(&pool, None, &new_page("Budget 101", Some("published"), false))
        .await
        .unwrap();
    let menu = MenuRepo::create(
        &pool,
        &CreateMenu {
            name: "Footer".to_string(),
            slug: None,
            description: None,
            location: Some("footer".to_string()),
            is_active: None,
        },
    )
    .await
    .unwrap();

    let mut parent = new_item(menu.id, "Learn");
    parent.link_type = Some("url".to_string());
    parent.url = Some("/learn".to_string());
    let parent = MenuRepo::create_item(&pool, &parent).await.unwrap();

    let mut child = new_item(menu.id, "Budget 101");
    child.parent_id = Some(parent.id);
    child.link_type = Some("page".to_string());
    child.page_id = Some(page.id);
    MenuRepo::create_item(&pool, &child).await.unwrap();

    let mut hidden = new_item(menu.id, "Old");
    hidden.is_active = Some(false);
    MenuRepo::create_item(&pool, &hidden).await.unwrap();

    let links = MenuRepo::active_links(&pool, menu.id).await.unwrap();
    assert_eq!(links.len(), 2);

    let child_link = links.iter().find(|l| l.parent_id.is_some()).unwrap();
    assert_eq!(child_link.page_slug.as_deref(), Some("budget-101"));
    assert_eq!(
        resolve_menu_url(
            &child_link.link_type,
            child_link.page_slug.as_deref(),
            Some(child_link.url.as_str()),
            child_link.category_slug.as_deref(),
        ),
        "/page/budget-101/"
    );

    let with_count = MenuRepo::find_by_id(&pool, menu.id, true).await.unwrap().unwrap();
    assert_eq!(with_count.item_count, 2);

    let nodes = links
        .iter()
        .map(|l| MenuNode {
            id: l.id,
            parent_id: l.parent_id,
            title: l.title.clone(),
            url: l.url.clone(),
            icon: None,
            css_class: None,
            target_new_tab: l.target_new_tab,
            sort_order: l.sort_order,
            children: Vec::new(),
        })
        .collect::<Vec<_>>();
    let tree = build_menu_tree(nodes);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_settings_hide_private_keys(pool: PgPool) {
    SiteSettingRepo::create(&pool, &new_setting("site_tagline", true)).await.unwrap();
    SiteSettingRepo::create(&pool, &new_setting("smtp_password", false)).await.unwrap();

    let public = SiteSettingRepo::all(&pool, None, true).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].key, "site_tagline");
    assert_eq!(public[0].category, "general");
    assert_eq!(SiteSettingRepo::all(&pool, None, false).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_setting_key_conflicts(pool: PgPool) {
    SiteSettingRepo::create(&pool, &new_setting("theme", true)).await.unwrap();
    let err = SiteSettingRepo::create(&pool, &new_setting("theme", true))
        .await
        .unwrap_err();
    assert_eq!(
        err.as_database_error().unwrap().code().as_deref(),
        Some("23505")
    );
}

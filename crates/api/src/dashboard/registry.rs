//! Static metadata about the REST resources, used by the HTML dashboard to
//! decide which write controls to show and how to draw the create form.
//!
//! Lookups are best effort: a path that matches no resource simply gets a
//! dashboard page without the metadata and form sections.

use bns_core::analytics::{FUNNEL_STAGES, VALID_ENGAGEMENT_EVENTS};
use bns_core::cms::{
    VALID_LINK_TYPES, VALID_MENU_LOCATIONS, VALID_PAGE_STATUSES, VALID_PAGE_TEMPLATES,
    VALID_SETTING_CATEGORIES, VALID_SETTING_TYPES, VALID_WIDGET_TYPES,
};
use bns_core::content::{
    VALID_DIFFICULTY_LEVELS, VALID_PLATFORMS, VALID_POST_STATUSES, VALID_POST_TYPES,
    VALID_VIDEO_CONTENT_TYPES,
};
use bns_core::dashboard::FieldKind::{
    Boolean, Char, Choice, Date, DateTime, Decimal, Email, Integer, Json, Text, Url,
};
use bns_core::dashboard::{path_matches, FieldDescriptor, FieldKind};
use bns_core::newsletter::{VALID_CAMPAIGN_TYPES, VALID_CONTENT_PREFERENCES};
use bns_core::sponsors::{
    VALID_ASSET_TYPES, VALID_DELIVERABLE_TYPES, VALID_DONOR_TYPES, VALID_PAYMENT_METHODS,
    VALID_RECURRING_FREQUENCIES, VALID_SPONSOR_LEVELS,
};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Prefix every resource path below is relative to.
pub const API_PREFIX: &str = "/api/v1";

const READ: &[&str] = &["GET"];
const READ_CREATE: &[&str] = &["GET", "POST"];
const READ_WRITE: &[&str] = &["GET", "PUT", "DELETE"];
const READ_DELETE: &[&str] = &["GET", "DELETE"];
const READ_UPDATE: &[&str] = &["GET", "PUT"];
const DELETE_ONLY: &[&str] = &["DELETE"];

/// One REST resource: its collection path, its item path and what each
/// accepts.
#[derive(Debug)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    /// Area the resource belongs to (`accounts`, `content`, ...).
    pub area: &'static str,
    pub collection: &'static str,
    pub item: Option<&'static str>,
    pub collection_methods: &'static [&'static str],
    pub item_methods: &'static [&'static str],
    pub fields: &'static [FieldDescriptor],
}

/// A resolved lookup: the resource and the methods of the matched path.
#[derive(Debug, Clone, Copy)]
pub struct ResourceMatch {
    pub resource: &'static ResourceDescriptor,
    pub methods: &'static [&'static str],
    /// Whether the path names the collection (where the create form lives).
    pub is_collection: bool,
}

/// Find the resource serving `path` (a full request path including the
/// `/api/v1` prefix).
pub fn lookup(path: &str) -> Option<ResourceMatch> {
    let relative = path.strip_prefix(API_PREFIX)?;
    RESOURCES.iter().find_map(|resource| {
        if path_matches(resource.collection, relative) {
            return Some(ResourceMatch {
                resource,
                methods: resource.collection_methods,
                is_collection: true,
            });
        }
        resource
            .item
            .filter(|item| path_matches(item, relative))
            .map(|_| ResourceMatch {
                resource,
                methods: resource.item_methods,
                is_collection: false,
            })
    })
}

// ---------------------------------------------------------------------------
// Endpoint index
// ---------------------------------------------------------------------------

/// An area of the API as listed on the `/api` index page.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointGroup {
    pub area: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub path: String,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub name: &'static str,
    pub path: String,
    pub methods: Vec<&'static str>,
}

const AREAS: &[(&str, &str, &str)] = &[
    (
        "accounts",
        "Accounts",
        "User accounts, donors, sponsors and partners management",
    ),
    ("content", "Content", "Videos, blog posts, playlists and categories"),
    ("newsletter", "Newsletter", "Subscribers and email campaigns"),
    ("sponsors", "Sponsors", "Sponsors, donations and deliverables"),
    ("analytics", "Analytics", "Page views, video engagement and donor funnel"),
    ("cms", "CMS", "Pages, navigation, settings, widgets and media"),
];

/// Areas with their resources, in display order.
pub static ENDPOINT_GROUPS: Lazy<Vec<EndpointGroup>> = Lazy::new(|| {
    AREAS
        .iter()
        .map(|&(area, name, description)| EndpointGroup {
            area,
            name,
            description,
            path: format!("{API_PREFIX}/{area}/"),
            endpoints: RESOURCES
                .iter()
                .filter(|r| r.area == area)
                .map(|r| {
                    let mut methods: Vec<&'static str> = r.collection_methods.to_vec();
                    for m in r.item_methods {
                        if !methods.contains(m) {
                            methods.push(m);
                        }
                    }
                    Endpoint {
                        name: r.name,
                        path: format!("{API_PREFIX}{}", r.collection),
                        methods,
                    }
                })
                .collect(),
        })
        .collect()
});

// ---------------------------------------------------------------------------
// Field declarations
// ---------------------------------------------------------------------------

const fn f(name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor::new(name, kind)
}

static USER_FIELDS: &[FieldDescriptor] = &[
    f("email", Email).required(),
    f("username", Char).required().max_length(150),
    f("password", Char).required().write_only(),
    f("password_confirm", Char).required().write_only(),
    f("first_name", Char).max_length(150),
    f("last_name", Char).max_length(150),
    f("phone", Char).max_length(20),
    f("organization", Char).max_length(200),
    f("bio", Text),
];

static DONOR_FIELDS: &[FieldDescriptor] = &[
    f("user_id", Integer).required(),
    f("donor_type", Choice).choices(VALID_DONOR_TYPES),
    f("tax_id", Char).max_length(50),
    f("billing_address", Text),
    f("is_recurring_donor", Boolean),
    f("preferred_payment_method", Choice).choices(VALID_PAYMENT_METHODS),
    f("total_donated", Decimal).read_only(),
    f("notes", Text),
];

static SPONSOR_FIELDS: &[FieldDescriptor] = &[
    f("user_id", Integer).required(),
    f("company_name", Char).required().max_length(200),
    f("logo_url", Url),
    f("website", Url),
    f("level", Choice).choices(VALID_SPONSOR_LEVELS),
    f("contract_value", Decimal),
    f("contract_start", Date),
    f("contract_end", Date),
    f("brand_visibility_slots", Integer),
    f("dedicated_content_pieces", Integer),
    f("event_sponsorships", Integer),
    f("is_active", Boolean),
];

static PARTNER_FIELDS: &[FieldDescriptor] = &[
    f("name", Char).required().max_length(200),
    f("slug", Char).help("Generated from the name when left blank"),
    f("logo_url", Url),
    f("description", Text),
    f("website", Url),
    f("content_contribution_weight", Decimal),
    f("joined_date", Date),
    f("is_active", Boolean),
];

static ORGANIZATION_FIELDS: &[FieldDescriptor] = &[
    f("organization_name", Char).required().max_length(200),
    f("consortium_name", Char).max_length(200),
    f("tagline", Char).max_length(200),
    f("brand_promise", Char).max_length(300),
    f("description", Text),
    f("vision", Text),
    f("mission", Text),
    f("headquarters", Char).max_length(200),
    f("year_established", Integer),
    f("email_general", Email),
    f("email_partnerships", Email),
    f("email_media", Email),
    f("phone", Char).max_length(20),
    f("website", Url),
    f("primary_color", Char).max_length(7),
    f("secondary_color", Char).max_length(7),
];

static CATEGORY_FIELDS: &[FieldDescriptor] = &[
    f("name", Char).required().max_length(100),
    f("slug", Char),
    f("description", Text),
    f("color", Char).max_length(7),
    f("icon", Char).max_length(50),
    f("sort_order", Integer),
    f("is_active", Boolean),
];

static VIDEO_FIELDS: &[FieldDescriptor] = &[
    f("title", Char).required().max_length(200),
    f("slug", Char),
    f("description", Text),
    f("platform", Choice).required().choices(VALID_PLATFORMS),
    f("external_id", Char).required().max_length(100),
    f("external_url", Url).required(),
    f("embed_url", Url),
    f("thumbnail_url", Url),
    f("content_type", Choice).choices(VALID_VIDEO_CONTENT_TYPES),
    f("duration_seconds", Integer),
    f("is_featured", Boolean),
    f("is_published", Boolean),
    f("published_at", DateTime),
    f("playlist_id", Integer),
    f("view_count", Integer).read_only(),
];

static PLAYLIST_FIELDS: &[FieldDescriptor] = &[
    f("title", Char).required().max_length(200),
    f("slug", Char),
    f("description", Text),
    f("thumbnail_url", Url),
    f("is_featured", Boolean),
    f("difficulty_level", Choice).choices(VALID_DIFFICULTY_LEVELS),
    f("estimated_duration_minutes", Integer),
];

static POST_FIELDS: &[FieldDescriptor] = &[
    f("title", Char).required().max_length(200),
    f("slug", Char).help("Generated from the title when left blank"),
    f("excerpt", Char).max_length(500),
    f("content", Text).required(),
    f("post_type", Choice).choices(VALID_POST_TYPES),
    f("status", Choice).choices(VALID_POST_STATUSES),
    f("featured_image_url", Url),
    f("published_at", DateTime),
    f("allow_comments", Boolean),
    f("meta_title", Char).max_length(70),
    f("meta_description", Char).max_length(160),
    f("read_time_minutes", Integer).read_only(),
];

static NEWS_FIELDS: &[FieldDescriptor] = &[
    f("title", Char).required().max_length(200),
    f("slug", Char),
    f("content", Text).required(),
    f("source_url", Url),
    f("is_breaking", Boolean),
    f("expires_at", DateTime),
];

static SUBSCRIBER_FIELDS: &[FieldDescriptor] = &[
    f("email", Email).required(),
    f("first_name", Char).max_length(100),
    f("last_name", Char).max_length(100),
    f("content_preference", Choice).choices(VALID_CONTENT_PREFERENCES),
    f("source", Char).max_length(50),
    f("confirmation_token", Char).write_only(),
];

static CAMPAIGN_FIELDS: &[FieldDescriptor] = &[
    f("name", Char).required().max_length(200),
    f("subject", Char).required().max_length(200),
    f("preheader", Char).max_length(200),
    f("campaign_type", Choice).choices(VALID_CAMPAIGN_TYPES),
    f("html_content", Text).required(),
    f("text_content", Text),
    f("scheduled_at", DateTime),
    f("status", Char).read_only(),
];

static EMAIL_LOG_FIELDS: &[FieldDescriptor] = &[
    f("campaign_id", Integer).required(),
    f("subscriber_id", Integer).required(),
    f("message_id", Char).max_length(200),
];

static DONATION_FIELDS: &[FieldDescriptor] = &[
    f("donor_id", Integer).required(),
    f("amount", Decimal).required(),
    f("currency", Char).max_length(3),
    f("payment_method", Choice).required().choices(VALID_PAYMENT_METHODS),
    f("transaction_id", Char).max_length(100),
    f("is_recurring", Boolean),
    f("recurring_frequency", Choice).choices(VALID_RECURRING_FREQUENCIES),
    f("campaign_source", Char).max_length(100),
    f("receipt_number", Char).read_only(),
];

static DELIVERABLE_FIELDS: &[FieldDescriptor] = &[
    f("sponsor_id", Integer).required(),
    f("deliverable_type", Choice).required().choices(VALID_DELIVERABLE_TYPES),
    f("description", Text).required(),
    f("quantity_required", Integer),
    f("due_date", Date).required(),
    f("notes", Text),
    f("internal_notes", Text).write_only(),
];

static ASSET_FIELDS: &[FieldDescriptor] = &[
    f("sponsor_id", Integer).required(),
    f("name", Char).required().max_length(200),
    f("file_url", Url).required(),
    f("asset_type", Choice).choices(VALID_ASSET_TYPES),
    f("is_primary", Boolean),
];

static PAGE_VIEW_FIELDS: &[FieldDescriptor] = &[
    f("url", Url).required(),
    f("path", Char).required().max_length(500),
    f("content_type", Char).max_length(50),
    f("content_id", Integer),
    f("session_id", Char).max_length(100),
    f("referrer", Url),
];

static ENGAGEMENT_FIELDS: &[FieldDescriptor] = &[
    f("video_id", Integer).required(),
    f("session_id", Char).required().max_length(100),
    f("event_type", Choice).required().choices(VALID_ENGAGEMENT_EVENTS),
    f("timestamp_seconds", Integer),
    f("metadata", Json),
];

static FUNNEL_FIELDS: &[FieldDescriptor] = &[
    f("donor_id", Integer).required(),
    f("stage", Choice).required().choices(FUNNEL_STAGES),
    f("source", Char).max_length(100),
    f("value", Decimal),
];

static PAGE_FIELDS: &[FieldDescriptor] = &[
    f("title", Char).required().max_length(200),
    f("slug", Char),
    f("subtitle", Char).max_length(300),
    f("content", Text),
    f("template", Choice).choices(VALID_PAGE_TEMPLATES),
    f("status", Choice).choices(VALID_PAGE_STATUSES),
    f("meta_title", Char).max_length(70),
    f("meta_description", Char).max_length(160),
    f("is_featured", Boolean),
    f("show_in_nav", Boolean),
    f("nav_order", Integer),
    f("published_at", DateTime),
];

static MENU_FIELDS: &[FieldDescriptor] = &[
    f("name", Char).required().max_length(100),
    f("slug", Char),
    f("description", Text),
    f("location", Choice).choices(VALID_MENU_LOCATIONS),
    f("is_active", Boolean),
];

static MENU_ITEM_FIELDS: &[FieldDescriptor] = &[
    f("menu_id", Integer).required(),
    f("parent_id", Integer),
    f("title", Char).required().max_length(100),
    f("link_type", Choice).choices(VALID_LINK_TYPES),
    f("page_id", Integer),
    f("url", Char).max_length(500),
    f("category_id", Integer),
    f("target_new_tab", Boolean),
    f("sort_order", Integer),
    f("is_active", Boolean),
];

static SETTING_FIELDS: &[FieldDescriptor] = &[
    f("key", Char).required().max_length(100),
    f("value", Text),
    f("value_type", Choice).choices(VALID_SETTING_TYPES),
    f("category", Choice).choices(VALID_SETTING_CATEGORIES),
    f("description", Char).max_length(255),
    f("is_public", Boolean),
];

static WIDGET_FIELDS: &[FieldDescriptor] = &[
    f("name", Char).required().max_length(100),
    f("widget_type", Choice).required().choices(VALID_WIDGET_TYPES),
    f("title", Char).max_length(200),
    f("content", Text),
    f("settings", Json),
    f("css_class", Char).max_length(100),
    f("is_active", Boolean),
    f("sort_order", Integer),
];

static MEDIA_FIELDS: &[FieldDescriptor] = &[
    f("title", Char).max_length(200),
    f("alt_text", Char).max_length(200),
    f("caption", Text),
    f("folder", Char).max_length(100),
    f("tags", Json),
    f("file_size", Integer).read_only(),
];

// ---------------------------------------------------------------------------
// Resource table
// ---------------------------------------------------------------------------

const fn resource(
    area: &'static str,
    name: &'static str,
    collection: &'static str,
    item: Option<&'static str>,
    collection_methods: &'static [&'static str],
    item_methods: &'static [&'static str],
    fields: &'static [FieldDescriptor],
) -> ResourceDescriptor {
    ResourceDescriptor {
        name,
        area,
        collection,
        item,
        collection_methods,
        item_methods,
        fields,
    }
}

/// A collection with list/create and an item with retrieve/update/delete.
const fn crud(
    area: &'static str,
    name: &'static str,
    collection: &'static str,
    item: &'static str,
    fields: &'static [FieldDescriptor],
) -> ResourceDescriptor {
    resource(area, name, collection, Some(item), READ_CREATE, READ_WRITE, fields)
}

/// A read-only custom action.
const fn action(
    area: &'static str,
    name: &'static str,
    path: &'static str,
    fields: &'static [FieldDescriptor],
) -> ResourceDescriptor {
    resource(area, name, path, None, READ, READ, fields)
}

/// Every browsable resource. Actions are listed before the resource they
/// belong to so that `/posts/featured` resolves to the action, not a slug.
pub static RESOURCES: &[ResourceDescriptor] = &[
    // accounts
    resource(
        "accounts",
        "My profile",
        "/accounts/users/me",
        None,
        READ_UPDATE,
        READ,
        USER_FIELDS,
    ),
    action("accounts", "Donor users", "/accounts/users/donors", USER_FIELDS),
    action("accounts", "Sponsor users", "/accounts/users/sponsors", USER_FIELDS),
    crud("accounts", "Users", "/accounts/users", "/accounts/users/{id}", USER_FIELDS),
    crud("accounts", "Donors", "/accounts/donors", "/accounts/donors/{id}", DONOR_FIELDS),
    crud("accounts", "Sponsors", "/accounts/sponsors", "/accounts/sponsors/{id}", SPONSOR_FIELDS),
    crud("accounts", "Partners", "/accounts/partners", "/accounts/partners/{slug}", PARTNER_FIELDS),
    action("accounts", "Organization profile", "/accounts/organization/public", &[]),
    action("accounts", "Organization impact", "/accounts/organization/impact", &[]),
    action("accounts", "Organization brand", "/accounts/organization/brand", &[]),
    action("accounts", "Organization contact", "/accounts/organization/contact", &[]),
    resource(
        "accounts",
        "Organization",
        "/accounts/organization",
        None,
        READ_UPDATE,
        READ,
        ORGANIZATION_FIELDS,
    ),
    // content
    crud(
        "content",
        "Categories",
        "/content/categories",
        "/content/categories/{id}",
        CATEGORY_FIELDS,
    ),
    action("content", "Featured videos", "/content/videos/featured", VIDEO_FIELDS),
    action("content", "Videos by platform", "/content/videos/by-platform", VIDEO_FIELDS),
    crud("content", "Videos", "/content/videos", "/content/videos/{id}", VIDEO_FIELDS),
    crud(
        "content",
        "Playlists",
        "/content/playlists",
        "/content/playlists/{slug}",
        PLAYLIST_FIELDS,
    ),
    action("content", "Featured post", "/content/posts/featured", POST_FIELDS),
    crud("content", "Posts", "/content/posts", "/content/posts/{slug}", POST_FIELDS),
    action("content", "Breaking news", "/content/news/breaking", NEWS_FIELDS),
    crud("content", "News", "/content/news", "/content/news/{id}", NEWS_FIELDS),
    // newsletter
    crud(
        "newsletter",
        "Subscribers",
        "/newsletter/subscribers",
        "/newsletter/subscribers/{id}",
        SUBSCRIBER_FIELDS,
    ),
    crud(
        "newsletter",
        "Campaigns",
        "/newsletter/campaigns",
        "/newsletter/campaigns/{id}",
        CAMPAIGN_FIELDS,
    ),
    resource(
        "newsletter",
        "Email logs",
        "/newsletter/email-logs",
        Some("/newsletter/email-logs/{id}"),
        READ_CREATE,
        READ,
        EMAIL_LOG_FIELDS,
    ),
    // sponsors
    action("sponsors", "Donation statistics", "/sponsors/donations/statistics", DONATION_FIELDS),
    crud(
        "sponsors",
        "Donations",
        "/sponsors/donations",
        "/sponsors/donations/{id}",
        DONATION_FIELDS,
    ),
    crud(
        "sponsors",
        "Deliverables",
        "/sponsors/deliverables",
        "/sponsors/deliverables/{id}",
        DELIVERABLE_FIELDS,
    ),
    action("sponsors", "Assets by sponsor", "/sponsors/assets/by-sponsor", ASSET_FIELDS),
    crud("sponsors", "Assets", "/sponsors/assets", "/sponsors/assets/{id}", ASSET_FIELDS),
    action("sponsors", "Sponsor dashboard", "/sponsors/dashboard", &[]),
    // analytics
    action("analytics", "Page view summary", "/analytics/pageviews/summary", PAGE_VIEW_FIELDS),
    resource(
        "analytics",
        "Page views",
        "/analytics/pageviews",
        Some("/analytics/pageviews/{id}"),
        READ_CREATE,
        READ_DELETE,
        PAGE_VIEW_FIELDS,
    ),
    action("analytics", "Engagement by video", "/analytics/engagement/by-video", ENGAGEMENT_FIELDS),
    resource(
        "analytics",
        "Video engagement",
        "/analytics/engagement",
        Some("/analytics/engagement/{id}"),
        READ_CREATE,
        DELETE_ONLY,
        ENGAGEMENT_FIELDS,
    ),
    action("analytics", "Funnel summary", "/analytics/funnel/summary", FUNNEL_FIELDS),
    resource(
        "analytics",
        "Donor funnel",
        "/analytics/funnel",
        Some("/analytics/funnel/{id}"),
        READ_CREATE,
        DELETE_ONLY,
        FUNNEL_FIELDS,
    ),
    // cms
    action("cms", "Published pages", "/cms/pages/published", PAGE_FIELDS),
    action("cms", "Navigation", "/cms/pages/navigation", PAGE_FIELDS),
    crud("cms", "Pages", "/cms/pages", "/cms/pages/{id}", PAGE_FIELDS),
    action("cms", "Menu by location", "/cms/menus/by-location", MENU_FIELDS),
    crud("cms", "Menus", "/cms/menus", "/cms/menus/{id}", MENU_FIELDS),
    crud("cms", "Menu items", "/cms/menu-items", "/cms/menu-items/{id}", MENU_ITEM_FIELDS),
    action("cms", "Public settings", "/cms/settings/public", SETTING_FIELDS),
    action("cms", "Settings by category", "/cms/settings/by-category", SETTING_FIELDS),
    crud("cms", "Site settings", "/cms/settings", "/cms/settings/{id}", SETTING_FIELDS),
    action("cms", "Active widgets", "/cms/widgets/active", WIDGET_FIELDS),
    action("cms", "Widgets by type", "/cms/widgets/by-type", WIDGET_FIELDS),
    crud("cms", "Widgets", "/cms/widgets", "/cms/widgets/{id}", WIDGET_FIELDS),
    action("cms", "Media by folder", "/cms/media/by-folder", MEDIA_FIELDS),
    action("cms", "Media by type", "/cms/media/by-type", MEDIA_FIELDS),
    crud("cms", "Media", "/cms/media", "/cms/media/{id}", MEDIA_FIELDS),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_paths_resolve_with_create() {
        let m = lookup("/api/v1/content/videos").expect("videos");
        assert_eq!(m.resource.name, "Videos");
        assert!(m.is_collection);
        assert!(m.methods.contains(&"POST"));
    }

    #[test]
    fn item_paths_resolve_with_update_and_delete() {
        let m = lookup("/api/v1/cms/pages/12/").expect("page");
        assert_eq!(m.resource.name, "Pages");
        assert!(!m.is_collection);
        assert_eq!(m.methods, READ_WRITE);
    }

    #[test]
    fn actions_win_over_item_patterns() {
        let m = lookup("/api/v1/content/posts/featured").expect("featured");
        assert_eq!(m.resource.name, "Featured post");
        assert_eq!(m.methods, READ);

        let me = lookup("/api/v1/accounts/users/me").expect("me");
        assert_eq!(me.resource.name, "My profile");
        assert_eq!(me.methods, READ_UPDATE);
    }

    #[test]
    fn unknown_paths_have_no_metadata() {
        assert!(lookup("/api/v1/nothing/here").is_none());
        assert!(lookup("/health").is_none());
    }

    #[test]
    fn index_lists_every_area_in_order() {
        let areas: Vec<_> = ENDPOINT_GROUPS.iter().map(|g| g.area).collect();
        assert_eq!(
            areas,
            ["accounts", "content", "newsletter", "sponsors", "analytics", "cms"]
        );
        assert!(ENDPOINT_GROUPS.iter().all(|g| !g.endpoints.is_empty()));
    }

    #[test]
    fn index_merges_collection_and_item_methods() {
        let cms = ENDPOINT_GROUPS.iter().find(|g| g.area == "cms").expect("cms");
        let pages = cms.endpoints.iter().find(|e| e.name == "Pages").expect("pages");
        assert_eq!(pages.methods, ["GET", "POST", "PUT", "DELETE"]);
        assert_eq!(pages.path, "/api/v1/cms/pages");
    }

    #[test]
    fn write_only_password_is_declared() {
        let users = lookup("/api/v1/accounts/users").expect("users");
        assert!(users
            .resource
            .fields
            .iter()
            .any(|d| d.name == "password" && d.write_only));
    }
}

//! CMS rules: page and menu URLs, nested menu trees, typed site settings and
//! media library helpers.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

pub const VALID_PAGE_TEMPLATES: &[&str] =
    &["default", "home", "about", "contact", "landing", "fullwidth"];

pub const PAGE_STATUS_PUBLISHED: &str = "published";

pub const VALID_PAGE_STATUSES: &[&str] = &["draft", PAGE_STATUS_PUBLISHED, "archived"];

pub const DEFAULT_MENU_LOCATION: &str = "header";

pub const VALID_MENU_LOCATIONS: &[&str] = &[DEFAULT_MENU_LOCATION, "footer", "sidebar", "mobile"];

pub const LINK_PAGE: &str = "page";
pub const LINK_URL: &str = "url";
pub const LINK_CATEGORY: &str = "category";

pub const VALID_LINK_TYPES: &[&str] = &[LINK_PAGE, LINK_URL, LINK_CATEGORY];

pub const VALID_SETTING_TYPES: &[&str] = &["text", "number", "boolean", "json", "image"];

pub const DEFAULT_SETTING_CATEGORY: &str = "general";

pub const VALID_SETTING_CATEGORIES: &[&str] = &[
    DEFAULT_SETTING_CATEGORY,
    "appearance",
    "social",
    "integrations",
    "analytics",
];

pub const VALID_WIDGET_TYPES: &[&str] = &[
    "hero",
    "featured_videos",
    "latest_posts",
    "newsletter",
    "sponsors",
    "stats",
    "testimonials",
    "call_to_action",
    "video_grid",
    "blog_grid",
    "custom_html",
];

pub const MEDIA_IMAGE: &str = "image";

pub const VALID_MEDIA_TYPES: &[&str] = &[MEDIA_IMAGE, "video", "document", "audio"];

/// Largest accepted media upload.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

/// Public URL of a CMS page.
pub fn page_url(slug: &str) -> String {
    format!("/page/{slug}/")
}

/// Public URL of a content category.
pub fn category_url(slug: &str) -> String {
    format!("/category/{slug}/")
}

/// Resolve the href of a menu item from its link type and whichever target
/// is set. Anything unresolvable becomes `#`.
pub fn resolve_menu_url(
    link_type: &str,
    page_slug: Option<&str>,
    url: Option<&str>,
    category_slug: Option<&str>,
) -> String {
    match (link_type, page_slug, url, category_slug) {
        (LINK_PAGE, Some(slug), _, _) => page_url(slug),
        (LINK_URL, _, Some(url), _) if !url.is_empty() => url.to_string(),
        (LINK_CATEGORY, _, _, Some(slug)) => category_url(slug),
        _ => "#".to_string(),
    }
}

/// A menu item must point at the target its link type names.
pub fn validate_menu_link(
    link_type: &str,
    page_id: Option<DbId>,
    url: Option<&str>,
    category_id: Option<DbId>,
) -> Result<(), CoreError> {
    crate::choices::validate_choice("link_type", link_type, VALID_LINK_TYPES)?;
    let ok = match link_type {
        LINK_PAGE => page_id.is_some(),
        LINK_URL => url.is_some_and(|u| !u.trim().is_empty()),
        _ => category_id.is_some(),
    };
    if ok {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "A '{link_type}' menu item needs its {link_type} target set"
        )))
    }
}

// ---------------------------------------------------------------------------
// Menu tree
// ---------------------------------------------------------------------------

/// One resolved menu item with its active children.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuNode {
    pub id: DbId,
    #[serde(skip)]
    pub parent_id: Option<DbId>,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub css_class: Option<String>,
    pub target_new_tab: bool,
    pub sort_order: i32,
    pub children: Vec<MenuNode>,
}

/// Assemble flat items (already filtered to active ones) into a tree of any
/// depth. Siblings are ordered by `sort_order`, then id. Items whose parent
/// is missing from `items` (inactive or foreign) are dropped with their
/// subtree.
pub fn build_menu_tree(items: Vec<MenuNode>) -> Vec<MenuNode> {
    let mut by_parent: HashMap<Option<DbId>, Vec<MenuNode>> = HashMap::new();
    for item in items {
        by_parent.entry(item.parent_id).or_default().push(item);
    }

    fn attach(
        parent: Option<DbId>,
        by_parent: &mut HashMap<Option<DbId>, Vec<MenuNode>>,
    ) -> Vec<MenuNode> {
        let mut nodes = by_parent.remove(&parent).unwrap_or_default();
        nodes.sort_by_key(|n| (n.sort_order, n.id));
        for node in &mut nodes {
            node.children = attach(Some(node.id), by_parent);
        }
        nodes
    }

    attach(None, &mut by_parent)
}

// ---------------------------------------------------------------------------
// Site settings
// ---------------------------------------------------------------------------

/// Validate a raw setting value against its declared type.
pub fn validate_setting_value(value_type: &str, raw: &str) -> Result<(), CoreError> {
    crate::choices::validate_choice("value_type", value_type, VALID_SETTING_TYPES)?;
    let ok = match value_type {
        "number" => raw.trim().parse::<f64>().is_ok(),
        "boolean" => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "false" | "1" | "0"
        ),
        "json" => serde_json::from_str::<serde_json::Value>(raw).is_ok(),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Value is not a valid {value_type}"
        )))
    }
}

/// Typed view of a stored setting value. Values that do not parse fall back
/// to the raw string.
pub fn setting_value_display(value_type: &str, raw: &str) -> serde_json::Value {
    match value_type {
        "boolean" => {
            let flag = raw.trim().to_ascii_lowercase();
            serde_json::Value::Bool(matches!(flag.as_str(), "true" | "1"))
        }
        "number" => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(raw.to_string())),
        "json" => serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string())),
        _ => serde_json::Value::String(raw.to_string()),
    }
}

/// Setting keys are lowercase identifiers with dots or underscores.
pub fn validate_setting_key(key: &str) -> Result<(), CoreError> {
    let ok = !key.is_empty()
        && key.len() <= 100
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.');
    if ok {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid setting key '{key}'. Use lowercase letters, digits, '_' and '.'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Human-readable file size with one decimal: `512.0 B`, `1.5 KB`, ... `TB`.
pub fn format_file_size(bytes: i64) -> String {
    let mut size = bytes.max(0) as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

/// Infer a media type from a file extension.
pub fn media_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => MEDIA_IMAGE,
        "mp4" | "mov" | "webm" | "mkv" => "video",
        "mp3" | "wav" | "ogg" | "m4a" => "audio",
        _ => "document",
    }
}

/// Reduce an uploaded filename to a safe basename: path components are
/// dropped and anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_filename(name: &str) -> Result<String, CoreError> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        return Err(CoreError::Validation("Uploaded file needs a filename".into()));
    }
    Ok(cleaned)
}

/// Validate an optional folder name: relative, no `..` segments.
pub fn validate_folder(folder: &str) -> Result<(), CoreError> {
    if folder.starts_with('/') || folder.split('/').any(|seg| seg == "..") {
        return Err(CoreError::Validation(format!("Invalid folder '{folder}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: DbId, parent_id: Option<DbId>, sort_order: i32) -> MenuNode {
        MenuNode {
            id,
            parent_id,
            title: format!("item {id}"),
            url: "#".into(),
            icon: None,
            css_class: None,
            target_new_tab: false,
            sort_order,
            children: Vec::new(),
        }
    }

    // -- urls ----------------------------------------------------------------

    #[test]
    fn menu_urls_resolve_by_link_type() {
        assert_eq!(resolve_menu_url(LINK_PAGE, Some("about"), None, None), "/page/about/");
        assert_eq!(
            resolve_menu_url(LINK_URL, None, Some("https://x.org"), None),
            "https://x.org"
        );
        assert_eq!(
            resolve_menu_url(LINK_CATEGORY, None, None, Some("county")),
            "/category/county/"
        );
    }

    #[test]
    fn unresolvable_menu_url_is_hash() {
        assert_eq!(resolve_menu_url(LINK_PAGE, None, Some("https://x"), None), "#");
        assert_eq!(resolve_menu_url(LINK_URL, None, Some(""), None), "#");
    }

    #[test]
    fn menu_link_needs_target() {
        assert!(validate_menu_link(LINK_PAGE, Some(1), None, None).is_ok());
        assert!(validate_menu_link(LINK_PAGE, None, None, None).is_err());
        assert!(validate_menu_link(LINK_URL, None, Some(" "), None).is_err());
        assert!(validate_menu_link("anchor", None, None, None).is_err());
    }

    // -- tree ----------------------------------------------------------------

    #[test]
    fn tree_nests_to_any_depth() {
        let items = vec![
            node(1, None, 0),
            node(2, Some(1), 0),
            node(3, Some(2), 0),
            node(4, Some(3), 0),
        ];
        let tree = build_menu_tree(items);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].children[0].children[0].id, 4);
    }

    #[test]
    fn siblings_ordered_by_sort_order() {
        let items = vec![node(1, None, 2), node(2, None, 0), node(3, None, 1)];
        let ids: Vec<_> = build_menu_tree(items).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn orphans_are_dropped() {
        let items = vec![node(1, None, 0), node(5, Some(99), 0)];
        let tree = build_menu_tree(items);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    // -- settings ------------------------------------------------------------

    #[test]
    fn setting_values_validated_by_type() {
        assert!(validate_setting_value("number", "42.5").is_ok());
        assert!(validate_setting_value("number", "many").is_err());
        assert!(validate_setting_value("boolean", "TRUE").is_ok());
        assert!(validate_setting_value("boolean", "yes").is_err());
        assert!(validate_setting_value("json", r#"{"a":1}"#).is_ok());
        assert!(validate_setting_value("json", "{").is_err());
        assert!(validate_setting_value("text", "anything").is_ok());
    }

    #[test]
    fn setting_display_is_typed() {
        assert_eq!(setting_value_display("boolean", "True"), serde_json::json!(true));
        assert_eq!(setting_value_display("json", r#"[1,2]"#), serde_json::json!([1, 2]));
        assert_eq!(setting_value_display("json", "{broken"), serde_json::json!("{broken"));
        assert_eq!(setting_value_display("number", "3"), serde_json::json!(3.0));
    }

    #[test]
    fn setting_keys() {
        assert!(validate_setting_key("site.title").is_ok());
        assert!(validate_setting_key("Site Title").is_err());
    }

    // -- media ---------------------------------------------------------------

    #[test]
    fn file_sizes_format_with_one_decimal() {
        assert_eq!(format_file_size(0), "0.0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024_i64.pow(4)), "3.0 TB");
    }

    #[test]
    fn media_types_from_extension() {
        assert_eq!(media_type_for_extension("JPG"), MEDIA_IMAGE);
        assert_eq!(media_type_for_extension("mp4"), "video");
        assert_eq!(media_type_for_extension("pdf"), "document");
    }

    #[test]
    fn filenames_are_sanitised() {
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("budget brief (1).pdf").unwrap(), "budget_brief__1_.pdf");
        assert!(sanitize_filename("...").is_err());
    }

    #[test]
    fn folders_cannot_escape() {
        assert!(validate_folder("logos/2025").is_ok());
        assert!(validate_folder("../secrets").is_err());
        assert!(validate_folder("/abs").is_err());
    }
}

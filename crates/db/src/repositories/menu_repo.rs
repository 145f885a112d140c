//! Repository for the `menus` and `menu_items` tables.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::menu::{
    CreateMenu, CreateMenuItem, Menu, MenuItem, MenuItemLink, MenuItemQuery, MenuWithCount,
    UpdateMenu, UpdateMenuItem,
};
use crate::repositories::support::available_slug;

/// Column list shared across queries to avoid repetition.
const MENU_COLUMNS: &str =
    "id, name, slug, description, location, is_active, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, menu_id, parent_id, title, link_type, page_id, url, category_id, \
                            icon, css_class, target_new_tab, sort_order, is_active, created_at, \
                            updated_at";

/// Menus with their active item count.
const WITH_COUNT: &str = "SELECT m.id, m.name, m.slug, m.description, m.location, m.is_active,
        m.created_at, m.updated_at,
        (SELECT COUNT(*) FROM menu_items i WHERE i.menu_id = m.id AND i.is_active) AS item_count
     FROM menus m";

/// Provides CRUD operations for navigation menus and their items.
pub struct MenuRepo;

impl MenuRepo {
    // -- menus ---------------------------------------------------------------

    /// Insert a menu. A missing slug is derived from the name.
    pub async fn create(pool: &PgPool, input: &CreateMenu) -> Result<Menu, sqlx::Error> {
        let slug = match &input.slug {
            Some(slug) => slug.clone(),
            None => available_slug(pool, "menus", &input.name).await?,
        };
        let query = format!(
            "INSERT INTO menus (name, slug, description, location, is_active)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, 'header'), COALESCE($5, true))
             RETURNING {MENU_COLUMNS}"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        active_only: bool,
    ) -> Result<Option<MenuWithCount>, sqlx::Error> {
        let query = format!("{WITH_COUNT} WHERE m.id = $1 AND (NOT $2 OR m.is_active)");
        sqlx::query_as::<_, MenuWithCount>(&query)
            .bind(id)
            .bind(active_only)
            .fetch_optional(pool)
            .await
    }

    /// The first active menu at `location`.
    pub async fn find_by_location(
        pool: &PgPool,
        location: &str,
    ) -> Result<Option<MenuWithCount>, sqlx::Error> {
        let query = format!(
            "{WITH_COUNT} WHERE m.location = $1 AND m.is_active ORDER BY m.id LIMIT 1"
        );
        sqlx::query_as::<_, MenuWithCount>(&query)
            .bind(location)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MenuWithCount>, sqlx::Error> {
        let query = format!(
            "{WITH_COUNT} WHERE (NOT $1 OR m.is_active)
             ORDER BY m.location, m.name
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MenuWithCount>(&query)
            .bind(active_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, active_only: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM menus WHERE (NOT $1 OR is_active)")
            .bind(active_only)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenu,
    ) -> Result<Option<Menu>, sqlx::Error> {
        let query = format!(
            "UPDATE menus SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {MENU_COLUMNS}"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active items of a menu with the slugs their URLs resolve from,
    /// ordered for tree building.
    pub async fn active_links(
        pool: &PgPool,
        menu_id: DbId,
    ) -> Result<Vec<MenuItemLink>, sqlx::Error> {
        sqlx::query_as::<_, MenuItemLink>(
            "SELECT i.id, i.parent_id, i.title, i.link_type, i.url,
                    p.slug AS page_slug, c.slug AS category_slug,
                    i.icon, i.css_class, i.target_new_tab, i.sort_order
             FROM menu_items i
             LEFT JOIN pages p ON p.id = i.page_id
             LEFT JOIN categories c ON c.id = i.category_id
             WHERE i.menu_id = $1 AND i.is_active
             ORDER BY i.sort_order, i.id",
        )
        .bind(menu_id)
        .fetch_all(pool)
        .await
    }

    // -- items ---------------------------------------------------------------

    pub async fn create_item(
        pool: &PgPool,
        input: &CreateMenuItem,
    ) -> Result<MenuItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items (menu_id, parent_id, title, link_type, page_id, url,
                category_id, icon, css_class, target_new_tab, sort_order, is_active)
             VALUES ($1, $2, $3, COALESCE($4, 'page'), $5, COALESCE($6, ''), $7,
                COALESCE($8, ''), COALESCE($9, ''), COALESCE($10, false), COALESCE($11, 0),
                COALESCE($12, true))
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(input.menu_id)
            .bind(input.parent_id)
            .bind(&input.title)
            .bind(&input.link_type)
            .bind(input.page_id)
            .bind(&input.url)
            .bind(input.category_id)
            .bind(&input.icon)
            .bind(&input.css_class)
            .bind(input.target_new_tab)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_item(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM menu_items WHERE id = $1");
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_items(
        pool: &PgPool,
        filter: &MenuItemQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM menu_items
             WHERE ($1::BIGINT IS NULL OR menu_id = $1)
             ORDER BY menu_id, sort_order, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(filter.menu)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_items(pool: &PgPool, filter: &MenuItemQuery) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM menu_items WHERE ($1::BIGINT IS NULL OR menu_id = $1)",
        )
        .bind(filter.menu)
        .fetch_one(pool)
        .await
    }

    pub async fn update_item(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET
                parent_id = COALESCE($2, parent_id),
                title = COALESCE($3, title),
                link_type = COALESCE($4, link_type),
                page_id = COALESCE($5, page_id),
                url = COALESCE($6, url),
                category_id = COALESCE($7, category_id),
                icon = COALESCE($8, icon),
                css_class = COALESCE($9, css_class),
                target_new_tab = COALESCE($10, target_new_tab),
                sort_order = COALESCE($11, sort_order),
                is_active = COALESCE($12, is_active)
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(input.parent_id)
            .bind(&input.title)
            .bind(&input.link_type)
            .bind(input.page_id)
            .bind(&input.url)
            .bind(input.category_id)
            .bind(&input.icon)
            .bind(&input.css_class)
            .bind(input.target_new_tab)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_item(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

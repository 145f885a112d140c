//! Repository for the `widgets` table.

use bns_core::types::DbId;
use sqlx::PgPool;

use crate::models::widget::{CreateWidget, UpdateWidget, Widget, WidgetQuery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, widget_type, title, content, settings, css_class, is_active, \
                       sort_order, created_at, updated_at";

/// `$1` widget type, `$2` true restricts to active widgets.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR widget_type = $1) AND (NOT $2 OR is_active)";

/// Provides CRUD operations for page widgets.
pub struct WidgetRepo;

impl WidgetRepo {
    pub async fn create(pool: &PgPool, input: &CreateWidget) -> Result<Widget, sqlx::Error> {
        let query = format!(
            "INSERT INTO widgets (name, widget_type, title, content, settings, css_class,
                is_active, sort_order)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, '{{}}'::jsonb),
                COALESCE($6, ''), COALESCE($7, true), COALESCE($8, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(&input.name)
            .bind(&input.widget_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.settings)
            .bind(&input.css_class)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM widgets WHERE id = $1");
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List widgets in display order.
    pub async fn list(
        pool: &PgPool,
        filter: &WidgetQuery,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Widget>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM widgets {FILTER}
             ORDER BY sort_order, name, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(&filter.widget_type)
            .bind(active_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        filter: &WidgetQuery,
        active_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM widgets {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.widget_type)
            .bind(active_only)
            .fetch_one(pool)
            .await
    }

    /// Every widget matching the filter, unpaginated and in display order.
    pub async fn all(
        pool: &PgPool,
        widget_type: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<Widget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM widgets {FILTER} ORDER BY sort_order, name, id");
        sqlx::query_as::<_, Widget>(&query)
            .bind(widget_type)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWidget,
    ) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!(
            "UPDATE widgets SET
                name = COALESCE($2, name),
                widget_type = COALESCE($3, widget_type),
                title = COALESCE($4, title),
                content = COALESCE($5, content),
                settings = COALESCE($6, settings),
                css_class = COALESCE($7, css_class),
                is_active = COALESCE($8, is_active),
                sort_order = COALESCE($9, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.widget_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.settings)
            .bind(&input.css_class)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM widgets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

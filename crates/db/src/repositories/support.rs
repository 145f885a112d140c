//! Helpers shared by several repositories: slug allocation and
//! many-to-many link maintenance.

use bns_core::slug::{pick_available_slug, slug_search_prefix, slugify_truncated};
use bns_core::types::DbId;
use sqlx::{PgConnection, PgPool};

/// Derive a slug from `source` that is free in `table`.
///
/// `table` must be a trusted identifier; it is interpolated into SQL.
/// Slugs never contain `%` or `_`, so the prefix needs no LIKE escaping.
pub(crate) async fn available_slug(
    pool: &PgPool,
    table: &str,
    source: &str,
) -> Result<String, sqlx::Error> {
    let base = slugify_truncated(source);
    let base = if base.is_empty() { "item".to_string() } else { base };
    let query = format!("SELECT slug FROM {table} WHERE slug LIKE $1 || '%'");
    let taken: Vec<String> = sqlx::query_scalar(&query)
        .bind(slug_search_prefix(&base))
        .fetch_all(pool)
        .await?;
    Ok(pick_available_slug(&base, &taken))
}

/// Replace every `(owner_id, *)` row of a junction table with `ids`.
pub(crate) async fn replace_links(
    conn: &mut PgConnection,
    table: &str,
    owner_column: &str,
    other_column: &str,
    owner_id: DbId,
    ids: &[DbId],
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("DELETE FROM {table} WHERE {owner_column} = $1"))
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;
    if ids.is_empty() {
        return Ok(());
    }
    sqlx::query(&format!(
        "INSERT INTO {table} ({owner_column}, {other_column})
         SELECT $1, UNNEST($2::BIGINT[])
         ON CONFLICT DO NOTHING"
    ))
    .bind(owner_id)
    .bind(ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Ids linked to `owner_id` through a junction table, ascending.
pub(crate) async fn linked_ids(
    pool: &PgPool,
    table: &str,
    owner_column: &str,
    other_column: &str,
    owner_id: DbId,
) -> Result<Vec<DbId>, sqlx::Error> {
    sqlx::query_scalar(&format!(
        "SELECT {other_column} FROM {table} WHERE {owner_column} = $1 ORDER BY {other_column}"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint, got {data_type}");
    }
}

/// Every table carries `created_at` (or `uploaded_at`) as timestamptz, and
/// every table with `updated_at` keeps it current through a trigger.
#[sqlx::test(migrations = "./migrations")]
async fn test_timestamps_and_updated_at_triggers(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
           AND EXISTS (
               SELECT 1 FROM information_schema.columns c
               WHERE c.table_schema = 'public'
                 AND c.table_name = information_schema.tables.table_name
                 AND c.column_name = 'id')
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let created: Option<(String,)> = sqlx::query_as(
            "SELECT data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name IN ('created_at', 'uploaded_at')",
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .unwrap();
        let (data_type,) =
            created.unwrap_or_else(|| panic!("Table {table} has no creation timestamp"));
        assert_eq!(data_type, "timestamp with time zone", "Table {table} creation timestamp");

        let has_updated_at: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.columns
                WHERE table_schema = 'public' AND table_name = $1 AND column_name = 'updated_at')",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        if !has_updated_at.0 {
            continue;
        }

        let has_trigger: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.triggers
                WHERE event_object_table = $1 AND trigger_name = 'trg_' || $1 || '_updated_at')",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(has_trigger.0, "Table {table} has updated_at but no trigger");
    }
}

/// No character varying columns should exist; TEXT is preferred.
#[sqlx::test(migrations = "./migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Every foreign key column must have a corresponding index.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT
             tc.table_name,
             kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, column) in &fk_columns {
        let has_index: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = '{table}'
                  AND indexdef LIKE '%({column})%'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index.0, "FK column {table}.{column} has no index");
    }
}

/// Every foreign key constraint must have explicit ON DELETE and ON UPDATE rules.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_fks_have_on_delete_and_on_update(pool: PgPool) {
    let fk_rules: Vec<(String, String, String, String)> = sqlx::query_as(
        "SELECT
             rc.constraint_name,
             tc.table_name,
             rc.delete_rule,
             rc.update_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'
         ORDER BY tc.table_name, rc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        !fk_rules.is_empty(),
        "Expected at least one FK constraint in the schema"
    );

    for (constraint, table, delete_rule, update_rule) in &fk_rules {
        assert!(
            delete_rule != "NO ACTION" && update_rule != "NO ACTION",
            "FK {constraint} on {table} relies on the implicit NO ACTION rule"
        );
    }
}

/// Unique constraints follow the `uq_<table>_<columns>` naming that the API
/// maps to 409 Conflict.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name
         FROM information_schema.table_constraints
         WHERE constraint_schema = 'public' AND constraint_type = 'UNIQUE'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "Unique constraint {name} lacks the uq_ prefix");
    }
}

/// The organisation profile singleton is seeded by the migrations.
#[sqlx::test(migrations = "./migrations")]
async fn test_organization_profile_is_seeded(pool: PgPool) {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM organization_profile")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

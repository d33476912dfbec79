use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    mytrip_db::health_check(&pool).await.unwrap();

    for table in ["users", "bookmarks"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!tables.is_empty());
    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let data_type: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            assert_eq!(
                data_type.map(|(t,)| t).as_deref(),
                Some("timestamp with time zone"),
                "{table}.{col} should be timestamptz"
            );
        }
    }
}

/// Text columns are TEXT, never VARCHAR.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "VARCHAR columns found: {rows:?}");
}

/// The updated_at trigger fires on UPDATE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let user = mytrip_db::repositories::UserRepo::upsert(&pool, "user_trigger", None)
        .await
        .unwrap();

    sqlx::query("UPDATE users SET created_at = created_at - INTERVAL '1 day', updated_at = created_at - INTERVAL '1 day' WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let (created_at, updated_at): (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as("SELECT created_at, updated_at FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated_at > created_at, "trigger should overwrite updated_at");
}

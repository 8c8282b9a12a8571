//! SQLite discovery and sampling tests.
//!
//! This test suite covers:
//! - NULL and empty-string dropping
//! - Lossy decoding of invalid UTF-8 text
//! - Row limits and result shape
//! - Empty tables
//! - Identifier quoting for keywords and special characters
//! - Discovery ordering and `sqlite_sequence` exclusion
//! - Batch sampling past failing tables

#![cfg(feature = "sqlite")]

use dbsampler_core::{
    Result, SamplerError, SamplingAdapter, SamplingConfig, SamplingMethod, TableRef, ValueClass,
    adapters::sqlite::SqliteAdapter,
};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Opens a single-connection in-memory database
async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

async fn execute(pool: &SqlitePool, sql: &str) {
    sqlx::raw_sql(sql).execute(pool).await.unwrap();
}

fn sorted(values: &[String]) -> Vec<String> {
    let mut values = values.to_vec();
    values.sort();
    values
}

// =============================================================================
// Sampling Tests
// =============================================================================

#[tokio::test]
async fn test_sample_drops_null_and_empty_values() -> Result<()> {
    let pool = memory_pool().await;
    execute(
        &pool,
        "CREATE TABLE t (id INTEGER, name TEXT);
         INSERT INTO t VALUES (1, 'a'), (2, ''), (3, NULL);",
    )
    .await;

    let adapter = SqliteAdapter::from_pool(pool);
    let sample = adapter.sample_table(&TableRef::unqualified("t"), 10).await?;

    assert_eq!(sample.column_names, vec!["id", "name"]);
    assert_eq!(sample.values_for("name").unwrap(), &["a".to_string()]);
    assert_eq!(sorted(sample.values_for("id").unwrap()), vec!["1", "2", "3"]);
    assert_eq!(sample.rows_fetched, 3);
    assert_eq!(sample.method, SamplingMethod::RandomOrder);
    assert_eq!(
        sample.column_classes,
        vec![ValueClass::Numeric, ValueClass::Text]
    );

    Ok(())
}

#[tokio::test]
async fn test_sample_respects_limit() -> Result<()> {
    let pool = memory_pool().await;
    execute(
        &pool,
        "CREATE TABLE numbers (n INTEGER);
         WITH RECURSIVE seq(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM seq WHERE x < 200)
         INSERT INTO numbers SELECT x FROM seq;",
    )
    .await;

    let adapter = SqliteAdapter::from_pool(pool);
    let table = TableRef::unqualified("numbers");
    let sample = adapter.sample_table(&table, 25).await?;

    assert_eq!(sample.rows_fetched, 25);
    assert_eq!(sample.column_names.len(), sample.column_values.len());
    for (_, values) in sample.columns() {
        assert!(values.len() <= 25);
        assert!(values.iter().all(|v| !v.is_empty()));
    }

    // Shape is stable across calls even though the rows differ
    let again = adapter.sample_table(&table, 25).await?;
    assert_eq!(again.column_names, sample.column_names);
    assert_eq!(again.rows_fetched, 25);

    Ok(())
}

#[tokio::test]
async fn test_sample_replaces_invalid_utf8_in_text_column() -> Result<()> {
    let pool = memory_pool().await;
    execute(
        &pool,
        "CREATE TABLE t (id INTEGER, name TEXT, score REAL);
         INSERT INTO t VALUES (1, CAST(x'61ff62' AS TEXT), 1.5), (2, 'ok', NULL);",
    )
    .await;

    let adapter = SqliteAdapter::from_pool(pool);
    let sample = adapter.sample_table(&TableRef::unqualified("t"), 10).await?;

    assert_eq!(sorted(sample.values_for("name").unwrap()), vec!["a\u{fffd}b", "ok"]);
    assert_eq!(sorted(sample.values_for("id").unwrap()), vec!["1", "2"]);
    assert_eq!(sample.values_for("score").unwrap(), &["1.5".to_string()]);
    assert_eq!(sample.rows_fetched, 2);

    Ok(())
}

#[tokio::test]
async fn test_sample_empty_table_keeps_column_names() -> Result<()> {
    let pool = memory_pool().await;
    execute(&pool, "CREATE TABLE empty (id INTEGER, label TEXT, created DATETIME)").await;

    let adapter = SqliteAdapter::from_pool(pool);
    let sample = adapter.sample_table(&TableRef::unqualified("empty"), 10).await?;

    assert_eq!(sample.column_names, vec!["id", "label", "created"]);
    assert_eq!(sample.column_values.len(), 3);
    assert!(sample.is_empty());
    assert_eq!(sample.rows_fetched, 0);
    assert_eq!(sample.column_classes[2], ValueClass::Temporal);

    Ok(())
}

#[tokio::test]
async fn test_sample_quotes_keyword_and_special_names() -> Result<()> {
    let pool = memory_pool().await;
    execute(
        &pool,
        r#"CREATE TABLE "order" ("select" TEXT);
           INSERT INTO "order" VALUES ('x');
           CREATE TABLE "my ""odd"" table" (v TEXT);
           INSERT INTO "my ""odd"" table" VALUES ('y');"#,
    )
    .await;

    let adapter = SqliteAdapter::from_pool(pool);

    let sample = adapter.sample_table(&TableRef::unqualified("order"), 5).await?;
    assert_eq!(sample.values_for("select").unwrap(), &["x".to_string()]);

    let sample = adapter
        .sample_table(&TableRef::unqualified("my \"odd\" table"), 5)
        .await?;
    assert_eq!(sample.values_for("v").unwrap(), &["y".to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_sample_zero_limit_is_configuration_error() {
    let pool = memory_pool().await;
    execute(&pool, "CREATE TABLE t (id INTEGER)").await;

    let adapter = SqliteAdapter::from_pool(pool);
    let result = adapter.sample_table(&TableRef::unqualified("t"), 0).await;

    assert!(matches!(result, Err(SamplerError::Configuration { .. })));
}

#[tokio::test]
async fn test_sample_missing_table_is_query_error() {
    let adapter = SqliteAdapter::from_pool(memory_pool().await);
    let result = adapter
        .sample_table(&TableRef::unqualified("does_not_exist"), 10)
        .await;

    assert!(matches!(result, Err(SamplerError::Query { .. })));
}

// =============================================================================
// Discovery Tests
// =============================================================================

#[tokio::test]
async fn test_discovery_is_sorted_and_skips_sqlite_sequence() -> Result<()> {
    let pool = memory_pool().await;
    execute(
        &pool,
        "CREATE TABLE zebra (id INTEGER PRIMARY KEY AUTOINCREMENT);
         CREATE TABLE apple (id INTEGER);
         CREATE TABLE mango (id INTEGER);
         CREATE VIEW apple_view AS SELECT * FROM apple;
         INSERT INTO zebra DEFAULT VALUES;",
    )
    .await;

    let adapter = SqliteAdapter::from_pool(pool);
    let tables = adapter.discover_tables().await?;

    assert_eq!(
        tables,
        vec![
            TableRef::unqualified("apple"),
            TableRef::unqualified("mango"),
            TableRef::unqualified("zebra"),
        ]
    );
    assert!(tables.iter().all(|t| t.schema.is_empty()));

    Ok(())
}

// =============================================================================
// Batch Sampling Tests
// =============================================================================

#[tokio::test]
async fn test_batch_sampling_skips_failing_tables() -> Result<()> {
    let pool = memory_pool().await;
    execute(
        &pool,
        "CREATE TABLE a (v TEXT);
         INSERT INTO a VALUES ('1');
         CREATE TABLE b (v TEXT);
         INSERT INTO b VALUES ('2');",
    )
    .await;

    let adapter = SqliteAdapter::from_pool(pool);
    let tables = vec![
        TableRef::unqualified("a"),
        TableRef::unqualified("missing"),
        TableRef::unqualified("b"),
    ];
    let config = SamplingConfig::new().with_sample_size(10).with_throttle_ms(1);
    let batch = adapter.sample_tables(&tables, &config).await?;

    assert_eq!(batch.attempted(), 3);
    assert_eq!(batch.samples.len(), 2);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].table, TableRef::unqualified("missing"));

    Ok(())
}

#[tokio::test]
async fn test_batch_sampling_rejects_zero_sample_size() {
    let adapter = SqliteAdapter::from_pool(memory_pool().await);
    let config = SamplingConfig::new().with_sample_size(0);
    let result = adapter.sample_tables(&[], &config).await;

    assert!(matches!(result, Err(SamplerError::Configuration { .. })));
}

// =============================================================================
// Factory Tests
// =============================================================================

#[tokio::test]
async fn test_create_adapter_for_memory_database() -> Result<()> {
    let adapter = dbsampler_core::create_adapter(":memory:").await?;
    assert_eq!(adapter.dialect(), dbsampler_core::Dialect::SQLite);
    adapter.test_connection().await?;
    assert!(adapter.discover_tables().await?.is_empty());
    Ok(())
}

//! MySQL discovery and sampling tests.
//!
//! This test suite covers:
//! - System schema exclusion during discovery
//! - Bounded `LIMIT` sampling
//! - Back-tick quoting of keyword table names
//! - Text rendering of MySQL values

#![cfg(feature = "mysql")]

use dbsampler_core::{
    Result, SamplerError, SamplingAdapter, SamplingMethod, TableRef, ValueClass,
    adapters::mysql::MySqlAdapter,
};
use sqlx::MySqlPool;
use std::time::Duration;
use testcontainers_modules::{mysql::Mysql, testcontainers::runners::AsyncRunner};

/// Helper function to wait for MySQL to be ready
async fn wait_for_mysql_ready(database_url: &str, max_attempts: u32) -> Result<()> {
    let mut attempts = 0;
    while attempts < max_attempts {
        if let Ok(pool) = MySqlPool::connect(database_url).await {
            if sqlx::query("SELECT 1").fetch_one(&pool).await.is_ok() {
                pool.close().await;
                return Ok(());
            }
            pool.close().await;
        }
        attempts += 1;
        if attempts < max_attempts {
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }
    Err(SamplerError::connection_failed(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        format!(
            "MySQL failed to become ready after {} attempts",
            max_attempts
        ),
    )))
}

/// Runs setup statements one at a time on a separate read-write pool
async fn setup(database_url: &str, statements: &[&str]) {
    let pool = MySqlPool::connect(database_url).await.unwrap();
    for statement in statements {
        sqlx::raw_sql(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;
}

#[tokio::test]
async fn test_mysql_discovery_excludes_system_schemas() -> Result<()> {
    let mysql = Mysql::default().start().await.unwrap();
    let port = mysql.get_host_port_ipv4(3306).await.unwrap();
    let database_url = format!("mysql://root@localhost:{}/test", port);

    wait_for_mysql_ready(&database_url, 30).await?;
    setup(
        &database_url,
        &[
            "CREATE DATABASE appdb",
            "CREATE TABLE appdb.customers (id INT PRIMARY KEY, name VARCHAR(50))",
            "CREATE TABLE appdb.accounts (id INT PRIMARY KEY)",
        ],
    )
    .await;

    let adapter = MySqlAdapter::new(&database_url).await?;
    let tables = adapter.discover_tables().await?;

    assert_eq!(
        tables,
        vec![
            TableRef::new("appdb", "accounts"),
            TableRef::new("appdb", "customers"),
        ]
    );
    assert!(!tables.iter().any(|table| table.schema == "sys"));

    adapter.close().await;
    Ok(())
}

#[tokio::test]
async fn test_mysql_sampling_is_bounded_and_sequential() -> Result<()> {
    let mysql = Mysql::default().start().await.unwrap();
    let port = mysql.get_host_port_ipv4(3306).await.unwrap();
    let database_url = format!("mysql://root@localhost:{}/test", port);

    wait_for_mysql_ready(&database_url, 30).await?;
    setup(
        &database_url,
        &[
            "CREATE TABLE test.`order` (id INT, code VARCHAR(10))",
            "INSERT INTO test.`order` VALUES (1, 'a'), (2, ''), (3, NULL), (4, 'd'), (5, 'e')",
        ],
    )
    .await;

    let adapter = MySqlAdapter::new(&database_url).await?;
    let sample = adapter
        .sample_table(&TableRef::new("test", "order"), 3)
        .await?;

    assert_eq!(sample.method, SamplingMethod::Sequential);
    assert_eq!(sample.rows_fetched, 3);
    assert_eq!(sample.column_names, vec!["id", "code"]);
    assert_eq!(sample.values_for("id").unwrap().len(), 3);
    assert!(sample.values_for("code").unwrap().len() <= 3);
    assert!(
        sample
            .values_for("code")
            .unwrap()
            .iter()
            .all(|value| !value.is_empty())
    );

    Ok(())
}

#[tokio::test]
async fn test_mysql_value_rendering_and_empty_table() -> Result<()> {
    let mysql = Mysql::default().start().await.unwrap();
    let port = mysql.get_host_port_ipv4(3306).await.unwrap();
    let database_url = format!("mysql://root@localhost:{}/test", port);

    wait_for_mysql_ready(&database_url, 30).await?;
    setup(
        &database_url,
        &[
            "CREATE TABLE test.events (
                amount DECIMAL(8, 2),
                active BOOLEAN,
                happened DATETIME,
                token VARBINARY(16),
                note TEXT
            )",
            "INSERT INTO test.events VALUES (9.75, TRUE, '2024-01-02 03:04:05', 'hi', 'ok')",
            "CREATE TABLE test.nothing (id INT, label VARCHAR(5))",
        ],
    )
    .await;

    let adapter = MySqlAdapter::new(&database_url).await?;
    let sample = adapter
        .sample_table(&TableRef::new("test", "events"), 10)
        .await?;

    assert_eq!(
        sample.column_classes,
        vec![
            ValueClass::Numeric,
            ValueClass::Boolean,
            ValueClass::Temporal,
            ValueClass::Binary,
            ValueClass::Text,
        ]
    );
    assert_eq!(sample.values_for("amount").unwrap(), &["9.75".to_string()]);
    assert_eq!(sample.values_for("active").unwrap(), &["1".to_string()]);
    assert_eq!(
        sample.values_for("happened").unwrap(),
        &["2024-01-02 03:04:05".to_string()]
    );
    assert_eq!(sample.values_for("token").unwrap(), &["hi".to_string()]);

    let empty = adapter
        .sample_table(&TableRef::new("test", "nothing"), 10)
        .await?;
    assert_eq!(empty.column_names, vec!["id", "label"]);
    assert!(empty.is_empty());

    Ok(())
}

//! Database adapter trait and factory for dialect-independent sampling.
//!
//! Every adapter wraps an already-open sqlx pool and exposes the same two
//! operations: table discovery and bounded row sampling. The trait is
//! object safe so callers can hold a `Box<dyn SamplingAdapter>` without
//! knowing the dialect.
//!
//! # Module Structure
//! - `config`: Configuration types (ConnectionConfig, SamplingConfig)
//! - `helpers`: Identifier quoting and value normalization
//! - Dialect-specific modules (postgres, mysql, sqlite)

use crate::models::{Dialect, SampleBatch, SampleResult, TableFailure, TableRef};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub mod config;

pub use config::{ConnectionConfig, DEFAULT_SAMPLE_SIZE, SamplingConfig, validate_limit};

/// Main trait for sampling adapters with object-safe design.
///
/// # Guarantees
/// - All operations are read-only (SELECT only)
/// - Every call is independent; nothing is cached between calls
/// - Failures are returned, never turned into a process exit
#[async_trait]
pub trait SamplingAdapter: Send + Sync {
    /// Tests the database connection.
    ///
    /// # Errors
    /// Returns a connection error if the server cannot be reached
    async fn test_connection(&self) -> Result<()>;

    /// Lists the user tables visible to introspection.
    ///
    /// System schemas are excluded. Results are ordered by name (SQLite) or
    /// by schema then name.
    ///
    /// # Errors
    /// Returns a connection error if the introspection query fails
    async fn discover_tables(&self) -> Result<Vec<TableRef>>;

    /// Samples at most `limit` rows from `table`.
    ///
    /// # Errors
    /// Returns error if:
    /// - `limit` is zero
    /// - The capability probe fails (PostgreSQL)
    /// - The sampling query fails
    /// - A row value cannot be decoded
    async fn sample_table(&self, table: &TableRef, limit: u32) -> Result<SampleResult>;

    /// Returns the dialect this adapter speaks.
    fn dialect(&self) -> Dialect;

    /// Gets the connection configuration (credentials sanitized).
    fn connection_config(&self) -> ConnectionConfig;

    /// Samples each table in turn, recording failures instead of aborting.
    ///
    /// Sleeps `config.throttle_ms` between tables when set.
    ///
    /// # Errors
    /// Returns error only if `config` is invalid
    async fn sample_tables(
        &self,
        tables: &[TableRef],
        config: &SamplingConfig,
    ) -> Result<SampleBatch> {
        config.validate()?;

        let mut batch = SampleBatch::default();
        for (position, table) in tables.iter().enumerate() {
            if position > 0
                && let Some(throttle_ms) = config.throttle_ms
            {
                tokio::time::sleep(Duration::from_millis(throttle_ms)).await;
            }

            match self.sample_table(table, config.sample_size).await {
                Ok(sample) => batch.samples.push(sample),
                Err(e) => {
                    tracing::warn!("Skipping table {}: {}", table, e);
                    batch.failures.push(TableFailure {
                        table: table.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Sampled {} of {} tables",
            batch.samples.len(),
            batch.attempted()
        );
        Ok(batch)
    }
}

/// Factory function to create a sampling adapter from a connection string.
///
/// # Security
/// - Detects the dialect from the connection string
/// - Sanitizes the connection string in all error messages
///
/// # Errors
/// Returns error if:
/// - Connection string format is invalid
/// - The dialect's driver is not compiled in
/// - The connection cannot be established
pub async fn create_adapter(connection_string: &str) -> Result<Box<dyn SamplingAdapter>> {
    let dialect = detect_dialect(connection_string)?;
    tracing::debug!(
        "Connecting to {} database at {}",
        dialect,
        redact_database_url(connection_string)
    );

    match dialect {
        #[cfg(feature = "postgresql")]
        Dialect::PostgreSQL => {
            let adapter = postgres::PostgresAdapter::new(connection_string).await?;
            Ok(Box::new(adapter))
        }
        #[cfg(not(feature = "postgresql"))]
        Dialect::PostgreSQL => Err(crate::error::SamplerError::unsupported_feature(
            "PostgreSQL adapter",
            "Compile with --features postgresql to enable PostgreSQL support",
        )),
        #[cfg(feature = "mysql")]
        Dialect::MySQL => {
            let adapter = mysql::MySqlAdapter::new(connection_string).await?;
            Ok(Box::new(adapter))
        }
        #[cfg(not(feature = "mysql"))]
        Dialect::MySQL => Err(crate::error::SamplerError::unsupported_feature(
            "MySQL adapter",
            "Compile with --features mysql to enable MySQL support",
        )),
        #[cfg(feature = "sqlite")]
        Dialect::SQLite => {
            let adapter = sqlite::SqliteAdapter::new(connection_string).await?;
            Ok(Box::new(adapter))
        }
        #[cfg(not(feature = "sqlite"))]
        Dialect::SQLite => Err(crate::error::SamplerError::unsupported_feature(
            "SQLite adapter",
            "Compile with --features sqlite to enable SQLite support",
        )),
    }
}

/// Safely redacts credentials from database connection URLs.
///
/// Delegates to `crate::error::redact_database_url`.
#[inline]
pub fn redact_database_url(url: &str) -> String {
    crate::error::redact_database_url(url)
}

/// Detects the dialect from a connection string.
///
/// # Errors
/// Returns error if the connection string format is unrecognized
pub fn detect_dialect(connection_string: &str) -> Result<Dialect> {
    if connection_string.starts_with("postgres://")
        || connection_string.starts_with("postgresql://")
    {
        Ok(Dialect::PostgreSQL)
    } else if connection_string.starts_with("mysql://") {
        Ok(Dialect::MySQL)
    } else if connection_string.starts_with("sqlite:")
        || connection_string == ":memory:"
        || connection_string.ends_with(".db")
        || connection_string.ends_with(".sqlite")
        || connection_string.ends_with(".sqlite3")
    {
        Ok(Dialect::SQLite)
    } else {
        Err(crate::error::SamplerError::configuration(
            "Unrecognized database connection string format",
        ))
    }
}

// Shared helper utilities
pub mod helpers;

// Dialect-specific adapter modules
#[cfg(feature = "postgresql")]
pub mod postgres;

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "sqlite")]
pub mod sqlite;

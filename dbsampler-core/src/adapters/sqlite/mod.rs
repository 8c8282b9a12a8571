//! SQLite sampling adapter.
//!
//! # Module Structure
//! - `connection`: File and in-memory database handling
//! - `discovery`: Table enumeration via `sqlite_master`
//! - `sampling`: `ORDER BY RANDOM()` row sampling
//! - `type_mapping`: SQLite type names to value classes
//!
//! SQLite has no schemas, so every discovered table is unqualified.

mod connection;
mod discovery;
mod sampling;
mod type_mapping;


use super::{ConnectionConfig, SamplingAdapter};
use crate::Result;
use crate::models::{Dialect, SampleResult, TableRef};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub use discovery::discover_tables;
pub use sampling::{build_sample_query, sample_table};
pub use type_mapping::classify_sqlite_type;

/// SQLite sampling adapter.
///
/// A single connection is sufficient; in-memory databases must stay on one
/// connection or each new connection would see an empty database.
pub struct SqliteAdapter {
    pub pool: SqlitePool,
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for SqliteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteAdapter")
            .field("config", &self.config)
            .field("is_in_memory", &self.is_in_memory())
            .finish()
    }
}

#[async_trait]
impl SamplingAdapter for SqliteAdapter {
    async fn test_connection(&self) -> Result<()> {
        let connectivity_result: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(crate::error::SamplerError::connection_failed)?;

        if connectivity_result != 1 {
            return Err(crate::error::SamplerError::configuration(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        Ok(())
    }

    async fn discover_tables(&self) -> Result<Vec<TableRef>> {
        discovery::discover_tables(&self.pool).await
    }

    async fn sample_table(&self, table: &TableRef, limit: u32) -> Result<SampleResult> {
        sampling::sample_table(&self.pool, table, limit).await
    }

    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }
}

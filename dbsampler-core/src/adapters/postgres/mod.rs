//! PostgreSQL sampling adapter.
//!
//! # Module Structure
//! - `connection`: Pool creation and session settings
//! - `discovery`: Table enumeration via `information_schema.tables`
//! - `sampling`: `TABLESAMPLE SYSTEM_ROWS` with a bounded-scan fallback
//! - `type_mapping`: PostgreSQL type names to value classes
//!
//! # Guarantees
//! - All operations are read-only (SELECT only)
//! - Connection strings are sanitized in error messages
//! - The `tsm_system_rows` probe runs on every sample call, never cached

mod connection;
mod discovery;
mod sampling;
mod type_mapping;


use super::{ConnectionConfig, SamplingAdapter};
use crate::Result;
use crate::models::{Dialect, SampleResult, TableRef};
use async_trait::async_trait;
use sqlx::PgPool;

// Re-export public items from submodules
pub use discovery::discover_tables;
pub use sampling::{
    TSM_SYSTEM_ROWS, build_sample_query, sample_table, tsm_system_rows_installed,
};
pub use type_mapping::classify_postgres_type;

/// PostgreSQL sampling adapter over a connection pool
pub struct PostgresAdapter {
    pub pool: PgPool,
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for PostgresAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresAdapter")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .field("pool_idle", &self.pool.num_idle())
            .finish()
    }
}

#[async_trait]
impl SamplingAdapter for PostgresAdapter {
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
        Dialect::PostgreSQL
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }
}

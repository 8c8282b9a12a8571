//! MySQL sampling adapter.
//!
//! # Module Structure
//! - `connection`: Pool creation and session settings
//! - `discovery`: Table enumeration via `information_schema.tables`
//! - `sampling`: Bounded `LIMIT` scans
//! - `type_mapping`: MySQL type names to value classes
//!
//! # Guarantees
//! - All operations are read-only (SELECT only)
//! - Connection strings are sanitized in error messages

mod connection;
mod discovery;
mod sampling;
mod type_mapping;


use super::{ConnectionConfig, SamplingAdapter};
use crate::Result;
use crate::models::{Dialect, SampleResult, TableRef};
use async_trait::async_trait;
use sqlx::MySqlPool;

pub use discovery::discover_tables;
pub use sampling::{build_sample_query, sample_table};
pub use type_mapping::classify_mysql_type;

/// MySQL sampling adapter over a connection pool
pub struct MySqlAdapter {
    pub pool: MySqlPool,
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlAdapter")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .field("pool_idle", &self.pool.num_idle())
            .finish()
    }
}

#[async_trait]
impl SamplingAdapter for MySqlAdapter {
    async fn test_connection(&self) -> Result<()> {
        let connectivity_result: i64 = sqlx::query_scalar("SELECT 1")
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
        Dialect::MySQL
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }
}

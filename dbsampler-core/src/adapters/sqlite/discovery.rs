//! SQLite table discovery.

use crate::Result;
use crate::error::SamplerError;
use crate::models::TableRef;
use sqlx::SqlitePool;

/// Lists user tables from `sqlite_master` ordered by name.
///
/// `sqlite_sequence` is internal bookkeeping for AUTOINCREMENT and is
/// skipped. Every reference is unqualified.
///
/// # Errors
/// Returns a connection error if the introspection query fails
pub async fn discover_tables(pool: &SqlitePool) -> Result<Vec<TableRef>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name != 'sqlite_sequence' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| SamplerError::discovery_failed("sqlite_master", e))?;

    let tables: Vec<TableRef> = names.into_iter().map(TableRef::unqualified).collect();

    tracing::info!("Discovered {} SQLite tables", tables.len());
    Ok(tables)
}

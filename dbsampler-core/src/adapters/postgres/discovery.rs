//! PostgreSQL table discovery.

use crate::Result;
use crate::error::SamplerError;
use crate::models::{Dialect, TableRef};
use sqlx::PgPool;

/// Builds the introspection query excluding the dialect's system schemas.
pub(crate) fn discovery_query() -> String {
    let excluded: Vec<String> = Dialect::PostgreSQL
        .excluded_schemas()
        .iter()
        .map(|schema| format!("'{}'", schema))
        .collect();

    format!(
        "SELECT table_schema::text AS table_schema, table_name::text AS table_name \
         FROM information_schema.tables \
         WHERE table_schema NOT IN ({}) \
         ORDER BY table_schema, table_name",
        excluded.join(", ")
    )
}

/// Lists tables visible through `information_schema.tables`, ordered by
/// schema then name.
///
/// # Errors
/// Returns a connection error if the introspection query fails
pub async fn discover_tables(pool: &PgPool) -> Result<Vec<TableRef>> {
    let query = discovery_query();
    let rows: Vec<(String, String)> = sqlx::query_as(&query)
        .fetch_all(pool)
        .await
        .map_err(|e| SamplerError::discovery_failed("information_schema.tables", e))?;

    let tables: Vec<TableRef> = rows
        .into_iter()
        .map(|(schema, name)| TableRef::new(schema, name))
        .collect();

    tracing::info!("Discovered {} PostgreSQL tables", tables.len());
    Ok(tables)
}

//! MySQL table discovery.
//!
//! `information_schema` columns are declared with a binary collation on
//! some server versions, so both are cast to `CHAR` to decode as text.

use crate::Result;
use crate::error::SamplerError;
use crate::models::{Dialect, TableRef};
use sqlx::MySqlPool;

/// Builds the introspection query excluding the dialect's system schemas.
pub(crate) fn discovery_query() -> String {
    let excluded: Vec<String> = Dialect::MySQL
        .excluded_schemas()
        .iter()
        .map(|schema| format!("'{}'", schema))
        .collect();

    format!(
        "SELECT CAST(table_schema AS CHAR) AS table_schema, \
         CAST(table_name AS CHAR) AS table_name \
         FROM information_schema.tables \
         WHERE table_schema NOT IN ({}) \
         ORDER BY table_schema, table_name",
        excluded.join(", ")
    )
}

/// Lists tables in every non-system schema, ordered by schema then name.
///
/// # Errors
/// Returns a connection error if the introspection query fails
pub async fn discover_tables(pool: &MySqlPool) -> Result<Vec<TableRef>> {
    let query = discovery_query();
    let rows: Vec<(String, String)> = sqlx::query_as(&query)
        .fetch_all(pool)
        .await
        .map_err(|e| SamplerError::discovery_failed("information_schema.tables", e))?;

    let tables: Vec<TableRef> = rows
        .into_iter()
        .map(|(schema, name)| TableRef::new(schema, name))
        .collect();

    tracing::info!("Discovered {} MySQL tables", tables.len());
    Ok(tables)
}

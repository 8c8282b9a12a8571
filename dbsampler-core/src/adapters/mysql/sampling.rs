//! MySQL data sampling.
//!
//! MySQL has no cheap server-side random sampling, so the first N rows in
//! storage order are returned and reported as `Sequential`. The query runs
//! over the text protocol, so cells arrive in the server's own rendering.

use super::type_mapping::classify_mysql_type;
use crate::adapters::config::validate_limit;
use crate::adapters::helpers::{bytes_to_text, collect_values, column_metadata, qualified_table_name};
use crate::error::SamplerError;
use crate::models::{Dialect, SampleResult, SamplingMethod, TableRef, ValueClass};
use sqlx::mysql::MySqlRow;
use sqlx::{Executor, MySqlPool, Row, Statement};

/// Builds the sampling query for a table.
///
/// # Example
/// ```rust
/// use dbsampler_core::adapters::mysql::build_sample_query;
/// use dbsampler_core::{SamplingMethod, TableRef};
///
/// let (query, method) = build_sample_query(&TableRef::new("appdb", "order"), 10);
/// assert_eq!(query, "SELECT * FROM `appdb`.`order` LIMIT 10");
/// assert_eq!(method, SamplingMethod::Sequential);
/// ```
pub fn build_sample_query(table: &TableRef, limit: u32) -> (String, SamplingMethod) {
    (
        format!(
            "SELECT * FROM {} LIMIT {}",
            qualified_table_name(Dialect::MySQL, table),
            limit
        ),
        SamplingMethod::Sequential,
    )
}

/// Samples at most `limit` rows from a MySQL table.
///
/// # Errors
/// Returns error if the limit is zero, the sampling query fails, or a value
/// cannot be decoded
pub async fn sample_table(
    pool: &MySqlPool,
    table: &TableRef,
    limit: u32,
) -> Result<SampleResult, SamplerError> {
    validate_limit(limit)?;

    let (query, method) = build_sample_query(table, limit);
    tracing::debug!("Sampling {} ({}): {}", table, method, query);

    let rows: Vec<MySqlRow> = sqlx::raw_sql(&query).fetch_all(pool).await.map_err(|e| {
        SamplerError::query_failed(format!("Failed to sample data from table '{}'", table), e)
    })?;

    let (column_names, column_classes) = match rows.first() {
        Some(row) => column_metadata(row.columns(), classify_mysql_type),
        None => {
            let statement = pool.prepare(&query).await.map_err(|e| {
                SamplerError::query_failed(
                    format!("Failed to describe sample query for table '{}'", table),
                    e,
                )
            })?;
            column_metadata(statement.columns(), classify_mysql_type)
        }
    };

    let column_values = collect_values(&rows, &column_names, &column_classes, table, decode_cell)?;

    tracing::debug!(
        "Fetched {} rows across {} columns from {}",
        rows.len(),
        column_names.len(),
        table
    );

    Ok(SampleResult {
        table: table.clone(),
        column_names,
        column_values,
        column_classes,
        method,
        rows_fetched: rows.len(),
        limit,
        sampled_at: chrono::Utc::now(),
    })
}

/// Decodes one text-protocol cell from its raw bytes.
///
/// Binary-collated columns may hold any bytes, and a mis-declared character
/// set can do the same to text columns, so no cell is decoded as UTF-8
/// directly.
fn decode_cell(
    row: &MySqlRow,
    index: usize,
    _class: ValueClass,
) -> Result<Option<String>, sqlx::Error> {
    Ok(row
        .try_get_unchecked::<Option<Vec<u8>>, _>(index)?
        .map(bytes_to_text))
}

//! SQLite data sampling.
//!
//! Every row gets a random sort key, so the sample is uniformly random at
//! the cost of reading the whole table.

use super::type_mapping::classify_sqlite_type;
use crate::adapters::config::validate_limit;
use crate::adapters::helpers::{bytes_to_text, collect_values, column_metadata, qualified_table_name};
use crate::error::SamplerError;
use crate::models::{Dialect, SampleResult, SamplingMethod, TableRef, ValueClass};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, SqlitePool, Statement};

/// Builds the sampling query for a table.
///
/// Any schema on the reference is ignored.
///
/// # Example
/// ```rust
/// use dbsampler_core::adapters::sqlite::build_sample_query;
/// use dbsampler_core::{SamplingMethod, TableRef};
///
/// let (query, method) = build_sample_query(&TableRef::unqualified("order"), 10);
/// assert_eq!(query, "SELECT * FROM \"order\" ORDER BY RANDOM() LIMIT 10");
/// assert_eq!(method, SamplingMethod::RandomOrder);
/// ```
pub fn build_sample_query(table: &TableRef, limit: u32) -> (String, SamplingMethod) {
    (
        format!(
            "SELECT * FROM {} ORDER BY RANDOM() LIMIT {}",
            qualified_table_name(Dialect::SQLite, table),
            limit
        ),
        SamplingMethod::RandomOrder,
    )
}

/// Samples at most `limit` random rows from a SQLite table.
///
/// # Errors
/// Returns error if the limit is zero, the sampling query fails, or a value
/// cannot be decoded
pub async fn sample_table(
    pool: &SqlitePool,
    table: &TableRef,
    limit: u32,
) -> Result<SampleResult, SamplerError> {
    validate_limit(limit)?;

    let (query, method) = build_sample_query(table, limit);
    tracing::debug!("Sampling {} ({}): {}", table, method, query);

    let rows: Vec<SqliteRow> = sqlx::raw_sql(&query).fetch_all(pool).await.map_err(|e| {
        SamplerError::query_failed(format!("Failed to sample data from table '{}'", table), e)
    })?;

    let (column_names, column_classes) = match rows.first() {
        Some(row) => column_metadata(row.columns(), classify_sqlite_type),
        None => {
            let statement = pool.prepare(&query).await.map_err(|e| {
                SamplerError::query_failed(
                    format!("Failed to describe sample query for table '{}'", table),
                    e,
                )
            })?;
            column_metadata(statement.columns(), classify_sqlite_type)
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

/// Decodes one cell as raw bytes.
///
/// SQLite columns are dynamically typed and TEXT values are not checked for
/// valid UTF-8, so every storage class is read through its byte form.
/// Integers and reals come back in SQLite's own text rendering.
fn decode_cell(
    row: &SqliteRow,
    index: usize,
    _class: ValueClass,
) -> Result<Option<String>, sqlx::Error> {
    Ok(row
        .try_get_unchecked::<Option<Vec<u8>>, _>(index)?
        .map(bytes_to_text))
}

//! PostgreSQL data sampling.
//!
//! When the `tsm_system_rows` extension is installed the sampler uses
//! page-level block sampling, which stays cheap on large tables at the cost
//! of exact randomness. Otherwise it falls back to the first N rows in
//! storage order and reports the sample as `Sequential`.
//!
//! The sampling query goes over the simple query protocol, so every value
//! arrives in PostgreSQL's own text output format regardless of column type.

use super::type_mapping::classify_postgres_type;
use crate::adapters::config::validate_limit;
use crate::adapters::helpers::{bytes_to_text, collect_values, column_metadata, qualified_table_name};
use crate::error::SamplerError;
use crate::models::{Dialect, SampleResult, SamplingMethod, TableRef, ValueClass};
use sqlx::postgres::PgRow;
use sqlx::{Executor, PgPool, Row, Statement, ValueRef};

/// Extension providing `TABLESAMPLE SYSTEM_ROWS`
pub const TSM_SYSTEM_ROWS: &str = "tsm_system_rows";

/// Checks whether `tsm_system_rows` is installed in the current database.
///
/// # Errors
/// Returns a capability-check error if the probe query fails
pub async fn tsm_system_rows_installed(pool: &PgPool) -> Result<bool, SamplerError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pg_extension WHERE extname = $1")
        .bind(TSM_SYSTEM_ROWS)
        .fetch_one(pool)
        .await
        .map_err(|e| SamplerError::capability_check_failed(TSM_SYSTEM_ROWS, e))?;

    Ok(count > 0)
}

/// Builds the sampling query for a table.
///
/// # Example
/// ```rust
/// use dbsampler_core::adapters::postgres::build_sample_query;
/// use dbsampler_core::{SamplingMethod, TableRef};
///
/// let table = TableRef::new("public", "users");
/// let (query, method) = build_sample_query(&table, 50, true);
/// assert_eq!(query, "SELECT * FROM \"public\".\"users\" TABLESAMPLE SYSTEM_ROWS(50)");
/// assert_eq!(method, SamplingMethod::SystemRows);
/// ```
pub fn build_sample_query(
    table: &TableRef,
    limit: u32,
    system_rows: bool,
) -> (String, SamplingMethod) {
    let quoted = qualified_table_name(Dialect::PostgreSQL, table);

    if system_rows {
        (
            format!("SELECT * FROM {} TABLESAMPLE SYSTEM_ROWS({})", quoted, limit),
            SamplingMethod::SystemRows,
        )
    } else {
        (
            format!("SELECT * FROM {} LIMIT {}", quoted, limit),
            SamplingMethod::Sequential,
        )
    }
}

/// Samples at most `limit` rows from a PostgreSQL table.
///
/// # Errors
/// Returns error if the limit is zero, the extension probe fails, the
/// sampling query fails, or a value cannot be decoded
pub async fn sample_table(
    pool: &PgPool,
    table: &TableRef,
    limit: u32,
) -> Result<SampleResult, SamplerError> {
    validate_limit(limit)?;

    let system_rows = tsm_system_rows_installed(pool).await?;
    if !system_rows {
        tracing::warn!(
            "{} is not installed, sampling first {} rows of {} sequentially",
            TSM_SYSTEM_ROWS,
            limit,
            table
        );
    }

    let (query, method) = build_sample_query(table, limit, system_rows);
    tracing::debug!("Sampling {} ({}): {}", table, method, query);

    let rows: Vec<PgRow> = sqlx::raw_sql(&query).fetch_all(pool).await.map_err(|e| {
        SamplerError::query_failed(format!("Failed to sample data from table '{}'", table), e)
    })?;

    let (column_names, column_classes) = match rows.first() {
        Some(row) => column_metadata(row.columns(), classify_postgres_type),
        None => {
            // No rows to read metadata from; describe the statement instead
            let statement = pool.prepare(&query).await.map_err(|e| {
                SamplerError::query_failed(
                    format!("Failed to describe sample query for table '{}'", table),
                    e,
                )
            })?;
            column_metadata(statement.columns(), classify_postgres_type)
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

/// Decodes one text-format cell.
///
/// `bytea` arrives hex-escaped (`\x...`); it is decoded back to its bytes
/// before conversion to a string. Every other cell is taken as its raw
/// text bytes.
fn decode_cell(row: &PgRow, index: usize, class: ValueClass) -> Result<Option<String>, sqlx::Error> {
    if class == ValueClass::Binary {
        return Ok(row
            .try_get_unchecked::<Option<Vec<u8>>, _>(index)?
            .map(bytes_to_text));
    }

    let value = row.try_get_raw(index)?;
    if value.is_null() {
        return Ok(None);
    }

    let bytes = value.as_bytes().map_err(sqlx::Error::Decode)?;
    Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
}

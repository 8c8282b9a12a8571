//! Helper utilities shared by the dialect adapters.
//!
//! Identifier quoting, result-column metadata extraction and the
//! NULL/empty-dropping value normalization live here so every dialect
//! applies exactly the same rules.

use crate::models::{Dialect, TableRef, ValueClass};
use crate::{Result, error::SamplerError};
use sqlx::{Column, Row, TypeInfo};

/// Quotes an identifier for the given dialect.
///
/// PostgreSQL and SQLite use double quotes, MySQL uses back-ticks. Any
/// embedded quote character is doubled.
///
/// # Example
/// ```rust
/// use dbsampler_core::adapters::helpers::quote_identifier;
/// use dbsampler_core::Dialect;
///
/// assert_eq!(quote_identifier(Dialect::PostgreSQL, "my\"table"), "\"my\"\"table\"");
/// assert_eq!(quote_identifier(Dialect::MySQL, "order"), "`order`");
/// ```
pub fn quote_identifier(dialect: Dialect, identifier: &str) -> String {
    match dialect {
        Dialect::MySQL => format!("`{}`", identifier.replace('`', "``")),
        Dialect::PostgreSQL | Dialect::SQLite => {
            format!("\"{}\"", identifier.replace('"', "\"\""))
        }
    }
}

/// Builds a quoted, possibly schema-qualified table reference.
///
/// An empty schema, or a dialect without schemas, produces an unqualified
/// reference.
pub fn qualified_table_name(dialect: Dialect, table: &TableRef) -> String {
    let name = quote_identifier(dialect, &table.name);
    if dialect.has_schemas() && table.is_qualified() {
        format!("{}.{}", quote_identifier(dialect, &table.schema), name)
    } else {
        name
    }
}

/// Extracts column names and value classes from result-set metadata.
///
/// Columns whose driver reports no native type are treated as text.
pub(crate) fn column_metadata<C: Column>(
    columns: &[C],
    classify: fn(&str) -> ValueClass,
) -> (Vec<String>, Vec<ValueClass>) {
    columns
        .iter()
        .map(|column| {
            let type_info = column.type_info();
            let class = if type_info.is_null() {
                ValueClass::Text
            } else {
                classify(type_info.name())
            };
            (column.name().to_string(), class)
        })
        .unzip()
}

/// Collects the non-empty values of every column across all rows.
///
/// `decode` returns the textual form of one cell, or `None` for NULL.
/// NULLs and empty strings are dropped.
pub(crate) fn collect_values<R, F>(
    rows: &[R],
    column_names: &[String],
    classes: &[ValueClass],
    table: &TableRef,
    decode: F,
) -> Result<Vec<Vec<String>>>
where
    R: Row,
    F: Fn(&R, usize, ValueClass) -> std::result::Result<Option<String>, sqlx::Error>,
{
    let mut values: Vec<Vec<String>> = vec![Vec::new(); classes.len()];

    for row in rows {
        for (index, (class, column_values)) in classes.iter().zip(values.iter_mut()).enumerate() {
            let cell = decode(row, index, *class).map_err(|e| {
                let column = column_names.get(index).map_or("?", String::as_str);
                SamplerError::scan_failed(column, &table.to_string(), e)
            })?;
            push_non_empty(column_values, cell);
        }
    }

    Ok(values)
}

/// Appends a value unless it is NULL or the empty string.
pub(crate) fn push_non_empty(values: &mut Vec<String>, cell: Option<String>) {
    if let Some(text) = cell
        && !text.is_empty()
    {
        values.push(text);
    }
}

/// Converts raw bytes to a string, replacing invalid UTF-8 sequences.
pub(crate) fn bytes_to_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

//! Core data models for table discovery and sampling.
//!
//! These types are shared by every dialect adapter. A `SampleResult` is
//! computed fresh on each call and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// PostgreSQL
    PostgreSQL,
    /// MySQL and MariaDB
    MySQL,
    /// SQLite files and in-memory databases
    SQLite,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::PostgreSQL => write!(f, "PostgreSQL"),
            Dialect::MySQL => write!(f, "MySQL"),
            Dialect::SQLite => write!(f, "SQLite"),
        }
    }
}

impl Dialect {
    /// Schemas that discovery never reports for this dialect.
    ///
    /// MySQL also excludes `sys`, which goes beyond the usual three system
    /// schemas. It holds only diagnostic views over `performance_schema`
    /// and the `sys_config` table, never user data.
    pub fn excluded_schemas(&self) -> &'static [&'static str] {
        match self {
            Dialect::PostgreSQL => &["information_schema", "pg_catalog"],
            Dialect::MySQL => &["information_schema", "mysql", "performance_schema", "sys"],
            Dialect::SQLite => &[],
        }
    }

    /// Whether discovery results carry a schema name.
    pub fn has_schemas(&self) -> bool {
        !matches!(self, Dialect::SQLite)
    }
}

/// Identifies a table by schema and name.
///
/// `schema` is empty for dialects without schema namespacing (SQLite); an
/// empty schema means the table is referenced unqualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRef {
    /// Schema (PostgreSQL) or database (MySQL) name; empty when unqualified
    pub schema: String,
    /// Table name, unquoted
    pub name: String,
}

impl TableRef {
    /// Creates a schema-qualified table reference.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Creates a table reference without a schema.
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }

    /// Returns true if the reference carries a schema.
    pub fn is_qualified(&self) -> bool {
        !self.schema.is_empty()
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_qualified() {
            write!(f, "{}.{}", self.schema, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// How the rows of a sample were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMethod {
    /// Page-level block sampling via `TABLESAMPLE SYSTEM_ROWS`
    SystemRows,
    /// Every row receives a random sort key (`ORDER BY RANDOM()`)
    RandomOrder,
    /// First N rows in storage order; not random
    Sequential,
}

impl SamplingMethod {
    /// Returns true if rows were chosen at random.
    pub fn is_random(&self) -> bool {
        !matches!(self, SamplingMethod::Sequential)
    }
}

impl std::fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingMethod::SystemRows => write!(f, "system_rows"),
            SamplingMethod::RandomOrder => write!(f, "random_order"),
            SamplingMethod::Sequential => write!(f, "sequential"),
        }
    }
}

/// Classification of a result column's native type.
///
/// Numeric, temporal, boolean and text values keep the server's textual
/// rendering verbatim. Binary values are converted from their raw bytes,
/// with invalid UTF-8 replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    /// Integers, decimals and floats
    Numeric,
    /// Dates, times and timestamps
    Temporal,
    /// Booleans
    Boolean,
    /// Byte strings
    Binary,
    /// Character data, and anything without a reported native type
    Text,
}

/// Output of sampling one table.
///
/// `column_values[i]` holds the non-empty values observed for
/// `column_names[i]`, in row order. NULLs and empty strings are dropped, so
/// value lists can be shorter than `rows_fetched` and differ in length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResult {
    /// The table that was sampled
    pub table: TableRef,
    /// Column names in result-set order
    pub column_names: Vec<String>,
    /// Non-empty values per column, parallel to `column_names`
    pub column_values: Vec<Vec<String>>,
    /// Value class per column, parallel to `column_names`
    pub column_classes: Vec<ValueClass>,
    /// How the rows were selected
    pub method: SamplingMethod,
    /// Rows returned by the sampling query, before NULL/empty dropping
    pub rows_fetched: usize,
    /// Requested row limit
    pub limit: u32,
    /// When the sampling query completed
    pub sampled_at: DateTime<Utc>,
}

impl SampleResult {
    /// Number of columns in the sampled result set.
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Values observed for the named column, if it exists.
    pub fn values_for(&self, column: &str) -> Option<&[String]> {
        self.column_names
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.column_values.get(index))
            .map(Vec::as_slice)
    }

    /// Iterates `(name, values)` pairs in result-set order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.column_values.iter().map(Vec::as_slice))
    }

    /// Returns true if no column produced any value.
    pub fn is_empty(&self) -> bool {
        self.column_values.iter().all(Vec::is_empty)
    }
}

/// A table that could not be sampled during batch sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFailure {
    /// The table that failed
    pub table: TableRef,
    /// Display form of the error
    pub error: String,
}

/// Result of sampling several tables, keeping going past failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleBatch {
    /// Tables sampled successfully, in request order
    pub samples: Vec<SampleResult>,
    /// Tables skipped because sampling failed
    pub failures: Vec<TableFailure>,
}

impl SampleBatch {
    /// Total number of tables attempted.
    pub fn attempted(&self) -> usize {
        self.samples.len().saturating_add(self.failures.len())
    }
}

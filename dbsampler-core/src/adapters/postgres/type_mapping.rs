//! PostgreSQL type classification.
//!
//! Maps the type names sqlx reports for result columns (`INT4`,
//! `TIMESTAMPTZ`, `BYTEA`, ...) onto value classes. Arrays, ranges, enums,
//! JSON, UUIDs and user-defined types are all rendered as text.

use crate::models::ValueClass;

/// Classifies a PostgreSQL column type name.
///
/// # Example
/// ```rust
/// use dbsampler_core::adapters::postgres::classify_postgres_type;
/// use dbsampler_core::ValueClass;
///
/// assert_eq!(classify_postgres_type("INT8"), ValueClass::Numeric);
/// assert_eq!(classify_postgres_type("TEXT[]"), ValueClass::Text);
/// ```
pub fn classify_postgres_type(type_name: &str) -> ValueClass {
    match type_name.trim().to_uppercase().as_str() {
        // Integer, floating point and arbitrary precision
        "INT2" | "INT4" | "INT8" | "SMALLINT" | "INTEGER" | "INT" | "BIGINT" | "FLOAT4"
        | "FLOAT8" | "REAL" | "DOUBLE PRECISION" | "NUMERIC" | "DECIMAL" | "MONEY" | "OID" => {
            ValueClass::Numeric
        }

        "BOOL" | "BOOLEAN" => ValueClass::Boolean,

        "DATE" | "TIME" | "TIMETZ" | "TIMESTAMP" | "TIMESTAMPTZ" | "INTERVAL" => {
            ValueClass::Temporal
        }

        "BYTEA" => ValueClass::Binary,

        _ => ValueClass::Text,
    }
}

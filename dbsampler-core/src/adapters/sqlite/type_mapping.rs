//! SQLite type classification.
//!
//! sqlx reports either the column's declared type or, for expressions, the
//! storage class of the value. Declared types are classified with SQLite's
//! affinity rules:
//! 1. Contains "INT" -> numeric
//! 2. Contains "CHAR", "CLOB" or "TEXT" -> text
//! 3. Contains "BLOB" -> binary
//! 4. Contains "REAL", "FLOA" or "DOUB" -> numeric
//!
//! Boolean and date/time declarations are recognized before affinity is
//! applied. Everything else, including `NULL`, is text.

use crate::models::ValueClass;

/// Classifies a SQLite column type name.
///
/// # Example
/// ```rust
/// use dbsampler_core::adapters::sqlite::classify_sqlite_type;
/// use dbsampler_core::ValueClass;
///
/// assert_eq!(classify_sqlite_type("BIGINT"), ValueClass::Numeric);
/// assert_eq!(classify_sqlite_type("VARCHAR(255)"), ValueClass::Text);
/// ```
pub fn classify_sqlite_type(type_name: &str) -> ValueClass {
    let upper = type_name.trim().to_uppercase();
    let base = upper.split('(').next().unwrap_or(&upper).trim();

    match base {
        "" | "NULL" => return ValueClass::Text,
        "BOOLEAN" | "BOOL" => return ValueClass::Boolean,
        "DATE" | "TIME" | "DATETIME" | "TIMESTAMP" => return ValueClass::Temporal,
        "NUMERIC" | "DECIMAL" => return ValueClass::Numeric,
        _ => {}
    }

    if base.contains("INT") {
        ValueClass::Numeric
    } else if base.contains("CHAR") || base.contains("CLOB") || base.contains("TEXT") {
        ValueClass::Text
    } else if base.contains("BLOB") {
        ValueClass::Binary
    } else if base.contains("REAL") || base.contains("FLOA") || base.contains("DOUB") {
        ValueClass::Numeric
    } else {
        ValueClass::Text
    }
}

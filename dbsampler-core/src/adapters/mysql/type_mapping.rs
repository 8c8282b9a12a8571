//! MySQL type classification.

use crate::models::ValueClass;

/// Classifies a MySQL column type name.
///
/// The ` UNSIGNED` suffix is ignored. `YEAR` is temporal; `BOOLEAN`
/// (`TINYINT(1)`) is boolean; `BIT` and the binary-collated string types
/// are binary. `JSON`, `ENUM`, `SET` and spatial types render as text.
///
/// # Example
/// ```rust
/// use dbsampler_core::adapters::mysql::classify_mysql_type;
/// use dbsampler_core::ValueClass;
///
/// assert_eq!(classify_mysql_type("BIGINT UNSIGNED"), ValueClass::Numeric);
/// assert_eq!(classify_mysql_type("VARBINARY"), ValueClass::Binary);
/// ```
pub fn classify_mysql_type(type_name: &str) -> ValueClass {
    let upper = type_name.trim().to_uppercase();
    let base = upper.strip_suffix(" UNSIGNED").unwrap_or(&upper);

    match base {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" | "DECIMAL"
        | "NUMERIC" | "FLOAT" | "DOUBLE" | "REAL" => ValueClass::Numeric,

        "BOOLEAN" | "BOOL" => ValueClass::Boolean,

        "DATE" | "TIME" | "DATETIME" | "TIMESTAMP" | "YEAR" => ValueClass::Temporal,

        "BIT" | "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            ValueClass::Binary
        }

        _ => ValueClass::Text,
    }
}

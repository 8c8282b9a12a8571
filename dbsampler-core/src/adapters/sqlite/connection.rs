//! SQLite connection handling.
//!
//! # Connection Modes
//! - File-based: `sqlite:///path/to/database.db`, `sqlite://./relative.db`
//!   or a bare path ending in `.db`, `.sqlite` or `.sqlite3`
//! - In-memory: `sqlite::memory:` or `:memory:`
//!
//! File databases are opened read-only by default and are never created.

use super::{ConnectionConfig, SqliteAdapter};
use crate::Result;
use crate::error::SamplerError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

impl SqliteAdapter {
    /// Opens a SQLite database from a connection string or file path.
    ///
    /// # Errors
    /// Returns error if:
    /// - Connection string format is invalid
    /// - Database file does not exist
    /// - Database cannot be opened
    pub async fn new(connection_string: &str) -> Result<Self> {
        let config = parse_connection_config(connection_string)?;
        let pool = create_connection(connection_string, &config).await?;

        Ok(Self { pool, config })
    }

    /// Wraps an already-open pool.
    ///
    /// The database name is taken from the pool's file name.
    pub fn from_pool(pool: SqlitePool) -> Self {
        let filename = pool
            .connect_options()
            .get_filename()
            .to_string_lossy()
            .into_owned();

        let config = ConnectionConfig::default()
            .with_database(extract_database_name(&filename))
            .with_max_connections(pool.options().get_max_connections());
        Self { pool, config }
    }

    /// Checks if the connection is to an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.config.database.as_deref() == Some(":memory:")
    }

    /// Closes the connection gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Parses a SQLite connection string into a configuration.
///
/// The database name is the file name, or `:memory:`.
///
/// # Errors
/// Returns error if the connection string format is invalid
pub(crate) fn parse_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
    validate_connection_string(connection_string)?;

    let mut config = ConnectionConfig::new("localhost".to_string())
        .with_database(extract_database_name(connection_string));
    config.port = None;

    Ok(config)
}

/// Validates SQLite connection string format.
///
/// # Errors
/// Returns a configuration error if the string is neither a `sqlite:` URL,
/// a database file path, nor `:memory:`
pub(crate) fn validate_connection_string(connection_string: &str) -> Result<()> {
    if connection_string == ":memory:"
        || connection_string.starts_with("sqlite:")
        || connection_string.ends_with(".db")
        || connection_string.ends_with(".sqlite")
        || connection_string.ends_with(".sqlite3")
    {
        return Ok(());
    }

    Err(SamplerError::configuration(
        "Invalid SQLite connection string format: expected sqlite:// URL, file path, or :memory:",
    ))
}

/// Extracts the database name from a connection string.
pub(crate) fn extract_database_name(connection_string: &str) -> String {
    if is_memory_string(connection_string) {
        return ":memory:".to_string();
    }

    let path = connection_string
        .strip_prefix("sqlite://")
        .or_else(|| connection_string.strip_prefix("sqlite:"))
        .unwrap_or(connection_string);
    let path = path.split('?').next().unwrap_or(path);

    match path.rsplit('/').next() {
        Some(filename) if !filename.is_empty() => filename.to_string(),
        _ => "main".to_string(),
    }
}

/// Normalizes a connection string to the SQLite URL form sqlx expects.
pub(crate) fn normalize_connection_string(connection_string: &str) -> String {
    if connection_string == ":memory:" {
        return "sqlite::memory:".to_string();
    }

    if connection_string.starts_with("sqlite:") {
        return connection_string.to_string();
    }

    format!("sqlite://{}", connection_string)
}

fn is_memory_string(connection_string: &str) -> bool {
    connection_string.contains(":memory:") || connection_string.contains("mode=memory")
}

async fn create_connection(
    connection_string: &str,
    config: &ConnectionConfig,
) -> Result<SqlitePool> {
    let normalized = normalize_connection_string(connection_string);
    let in_memory = is_memory_string(connection_string);

    let mut options = SqliteConnectOptions::from_str(&normalized).map_err(|e| {
        SamplerError::configuration(format!("Invalid SQLite connection string: {}", e))
    })?;

    // A read-only in-memory database could never hold any tables
    if config.read_only && !in_memory {
        options = options.read_only(true);
    }

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(config.connect_timeout);
    if in_memory {
        // Dropping the last connection discards the database
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        SamplerError::Connection {
            context: "Failed to open SQLite database".to_string(),
            source: Box::new(e),
        }
    })?;

    tracing::info!("Opened SQLite database ({})", config);
    Ok(pool)
}

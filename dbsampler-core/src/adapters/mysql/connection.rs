//! MySQL connection pool management.

use super::{ConnectionConfig, MySqlAdapter};
use crate::Result;
use crate::error::SamplerError;
use sqlx::MySqlPool;

/// Default MySQL port
const DEFAULT_PORT: u16 = 3306;

impl MySqlAdapter {
    /// Creates a new MySQL adapter from a connection URL.
    ///
    /// # Errors
    /// Returns error if:
    /// - Connection string format is invalid
    /// - Database connection fails
    pub async fn new(connection_string: &str) -> Result<Self> {
        let config = Self::parse_connection_config(connection_string)?;
        let pool = Self::create_connection_pool(connection_string, &config).await?;

        Ok(Self { pool, config })
    }

    /// Wraps an already-open pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        let config = ConnectionConfig::default()
            .with_port(DEFAULT_PORT)
            .with_max_connections(pool.options().get_max_connections());
        Self { pool, config }
    }

    /// Closes the connection pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Parses a MySQL URL into a connection configuration.
    ///
    /// # Errors
    /// Returns error if the connection string is malformed
    pub fn parse_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
        validate_connection_string(connection_string)?;
        ConnectionConfig::from_url(connection_string, DEFAULT_PORT)
    }

    async fn create_connection_pool(
        connection_string: &str,
        config: &ConnectionConfig,
    ) -> Result<MySqlPool> {
        use sqlx::Executor;

        let read_only = config.read_only;

        let pool = sqlx::mysql::MySqlPoolOptions::new()
            .max_connections(config.max_connections.min(100))
            .acquire_timeout(config.connect_timeout)
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if read_only {
                        conn.execute("SET SESSION TRANSACTION READ ONLY").await?;
                    }

                    // Render TIMESTAMP columns in UTC
                    conn.execute("SET time_zone = '+00:00'").await?;

                    Ok(())
                })
            })
            .connect(connection_string)
            .await
            .map_err(|e| SamplerError::Connection {
                context: format!(
                    "Failed to connect to {}",
                    crate::adapters::redact_database_url(connection_string)
                ),
                source: Box::new(e),
            })?;

        tracing::info!("Connected to MySQL ({})", config);
        Ok(pool)
    }
}

/// Validates that a connection string uses the `mysql://` scheme.
///
/// # Errors
/// Returns a configuration error for any other scheme
pub(crate) fn validate_connection_string(connection_string: &str) -> Result<()> {
    if connection_string.starts_with("mysql://") {
        Ok(())
    } else {
        Err(SamplerError::configuration(
            "Connection string must use mysql:// scheme",
        ))
    }
}

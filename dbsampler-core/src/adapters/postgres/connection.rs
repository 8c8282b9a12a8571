//! PostgreSQL connection pool management.
//!
//! Every pooled connection is switched to read-only with UTC timestamps so
//! temporal values render identically across sessions.

use super::{ConnectionConfig, PostgresAdapter};
use crate::Result;
use crate::error::SamplerError;
use sqlx::PgPool;

/// Default PostgreSQL port
const DEFAULT_PORT: u16 = 5432;

impl PostgresAdapter {
    /// Creates a new PostgreSQL adapter from a connection URL.
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
    ///
    /// Session settings are whatever the caller configured on the pool.
    pub fn from_pool(pool: PgPool) -> Self {
        let config = ConnectionConfig::default()
            .with_max_connections(pool.options().get_max_connections());
        Self { pool, config }
    }

    /// Closes the connection pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Parses a PostgreSQL URL into a connection configuration.
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
    ) -> Result<PgPool> {
        use sqlx::Executor;

        let read_only = config.read_only;

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections.min(100))
            .acquire_timeout(config.connect_timeout)
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    let app_name = format!("dbsampler-{}", env!("CARGO_PKG_VERSION"));
                    conn.execute(format!("SET application_name = '{}'", app_name).as_str())
                        .await?;

                    if read_only {
                        conn.execute("SET default_transaction_read_only = on")
                            .await?;
                    }

                    conn.execute("SET timezone = 'UTC'").await?;

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

        tracing::info!("Connected to PostgreSQL ({})", config);
        Ok(pool)
    }
}

/// Validates that a connection string uses a PostgreSQL scheme.
///
/// # Errors
/// Returns a configuration error for any other scheme
pub(crate) fn validate_connection_string(connection_string: &str) -> Result<()> {
    if connection_string.starts_with("postgres://")
        || connection_string.starts_with("postgresql://")
    {
        Ok(())
    } else {
        Err(SamplerError::configuration(
            "Connection string must use postgres:// or postgresql:// scheme",
        ))
    }
}

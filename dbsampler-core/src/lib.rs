//! Table discovery and row sampling across SQL dialects.
//!
//! Given an open connection to PostgreSQL, MySQL or SQLite, this crate lists
//! the user tables and draws a bounded sample of rows from any of them,
//! returning each column's non-empty values as text. The dialect
//! differences (introspection source, sampling strategy, identifier quoting,
//! type rendering) are hidden behind the [`SamplingAdapter`] trait.
//!
//! # Guarantees
//! - All database operations are read-only
//! - No credentials appear in errors, logs or configuration structs
//! - Every operation returns a [`Result`]; nothing aborts the process
//! - Nothing is cached between calls
//!
//! # Example
//! ```rust,no_run
//! use dbsampler_core::create_adapter;
//!
//! # async fn example() -> dbsampler_core::Result<()> {
//! let adapter = create_adapter("sqlite:///var/data/app.db").await?;
//! for table in adapter.discover_tables().await? {
//!     let sample = adapter.sample_table(&table, 100).await?;
//!     println!("{}: {} columns via {}", table, sample.column_count(), sample.method);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod error;
pub mod logging;
pub mod models;

pub use adapters::{
    ConnectionConfig, DEFAULT_SAMPLE_SIZE, SamplingAdapter, SamplingConfig, create_adapter,
    detect_dialect,
};
pub use error::{Result, SamplerError};
pub use logging::init_logging;
pub use models::{
    Dialect, SampleBatch, SampleResult, SamplingMethod, TableFailure, TableRef, ValueClass,
};

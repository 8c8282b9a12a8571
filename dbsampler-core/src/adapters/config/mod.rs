//! Configuration types for database adapters.
//!
//! - `ConnectionConfig`: how an adapter's pool was opened
//! - `SamplingConfig`: row limit and batch pacing
//!
//! # Security
//! These configuration structs intentionally do NOT store passwords or credentials.

mod connection;
mod sampling;

pub use connection::ConnectionConfig;
pub use sampling::{DEFAULT_SAMPLE_SIZE, SamplingConfig, validate_limit};

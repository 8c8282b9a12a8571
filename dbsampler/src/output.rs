//! JSON output for sampling results.

use dbsampler_core::{Result, SamplerError};
use serde::Serialize;
use std::path::Path;

/// Serializes a value as pretty-printed JSON.
///
/// # Errors
/// Returns a serialization error if the value cannot be encoded
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| SamplerError::Serialization {
        context: "JSON serialization".to_string(),
        source: e,
    })
}

/// Writes JSON to `path`, or to stdout when no path is given.
///
/// # Errors
/// Returns error if serialization or the file write fails
pub async fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = to_json(value)?;

    match path {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .map_err(|e| SamplerError::Io {
                    context: format!("Failed to write to {}", path.display()),
                    source: e,
                })?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

//! Data sampling configuration.
//!
//! Controls how many rows are pulled per table and how batch sampling
//! paces itself across tables.

use serde::{Deserialize, Serialize};

/// Default number of rows sampled per table.
pub const DEFAULT_SAMPLE_SIZE: u32 = 10_000;

/// Configuration for data sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Maximum number of rows to fetch per table
    pub sample_size: u32,
    /// Optional delay between tables in batch sampling (milliseconds)
    pub throttle_ms: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            throttle_ms: None,
        }
    }
}

impl SamplingConfig {
    /// Creates a new sampling config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set sample size.
    pub fn with_sample_size(mut self, size: u32) -> Self {
        self.sample_size = size;
        self
    }

    /// Builder method to set throttle delay.
    pub fn with_throttle_ms(mut self, ms: u64) -> Self {
        self.throttle_ms = Some(ms);
        self
    }

    /// Validates sampling parameters.
    ///
    /// # Errors
    /// Returns error if the sample size is zero
    pub fn validate(&self) -> crate::Result<()> {
        validate_limit(self.sample_size)
    }
}

/// Rejects a row limit of zero.
///
/// # Errors
/// Returns a configuration error if `limit` is 0
pub fn validate_limit(limit: u32) -> crate::Result<()> {
    if limit == 0 {
        return Err(crate::error::SamplerError::configuration(
            "sample limit must be greater than 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_config_default() {
        let config = SamplingConfig::default();
        assert_eq!(config.sample_size, 10_000);
        assert_eq!(config.throttle_ms, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sampling_config_builder() {
        let config = SamplingConfig::new()
            .with_sample_size(50)
            .with_throttle_ms(100);

        assert_eq!(config.sample_size, 50);
        assert_eq!(config.throttle_ms, Some(100));
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let config = SamplingConfig::new().with_sample_size(0);
        assert!(config.validate().is_err());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1).is_ok());
    }
}

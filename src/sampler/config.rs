//! Configuration for sampling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`Sampler`](super::Sampler).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SamplerConfig {
    /// Number of channels of the display (default: 1)
    pub channel_count: usize,
    /// Logical milliseconds between samples (default: 10)
    pub interval_ms: u64,
    /// Logical time of the first sample (default: 0)
    pub start_ms: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            channel_count: 1,
            interval_ms: 10,
            start_ms: 0,
        }
    }
}

impl SamplerConfig {
    /// Create a configuration for a display with `channel_count` channels.
    pub fn new(channel_count: usize) -> Self {
        Self {
            channel_count,
            ..Self::default()
        }
    }

    /// Set the sampling interval.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the time of the first sample.
    pub fn with_start_ms(mut self, start_ms: u64) -> Self {
        self.start_ms = start_ms;
        self
    }

    /// Sampling rate in Hz implied by the interval.
    pub fn rate_hz(&self) -> f64 {
        1000.0 / self.interval_ms.max(1) as f64
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.interval_ms == 0 {
            return Err("interval_ms must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = SamplerConfig::new(3).with_interval_ms(25).with_start_ms(100);
        assert_eq!(config.channel_count, 3);
        assert_eq!(config.interval_ms, 25);
        assert_eq!(config.start_ms, 100);
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_hz(), 40.0);
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let config = SamplerConfig::default().with_interval_ms(0);
        assert!(config.validate().is_err());
    }
}

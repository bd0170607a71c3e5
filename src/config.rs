//! # Global pipeline configuration.
//!
//! Provides [`Config`] centralized settings for the word-counting pipeline.
//!
//! Config is used in two ways:
//! 1. **Pipeline creation**: `Pipeline::builder(config)`
//! 2. **Provider construction**: `ProviderKind::build(&config)`
//!
//! All values are fixed at startup and shared read-only afterwards.

use std::time::Duration;

use crate::error::ConfigError;

/// Global configuration for the pipeline.
///
/// Defines:
/// - **Counting**: the target word
/// - **Admission**: the in-flight limit K
/// - **Network provider**: request timeout and redirect cap
/// - **Debug provider**: synthetic text and per-read delay
///
/// ## Notes
/// All fields are public for flexibility. Call [`Config::validate`] (the
/// builder does) before handing the config to the pipeline.
#[derive(Clone, Debug)]
pub struct Config {
    /// Word whose occurrences are counted (substring match, case-sensitive).
    pub target: String,

    /// Maximum number of workers executing at the same time (K).
    ///
    /// Must be at least 1.
    pub max_in_flight: usize,

    /// Client-wide request timeout of the `url` provider.
    pub http_timeout: Duration,

    /// Maximum number of redirects the `url` provider follows.
    pub max_redirects: usize,

    /// Content served by the `debug` provider for every source.
    pub debug_text: String,

    /// Artificial delay applied before every read of a `debug` stream.
    ///
    /// `Duration::ZERO` disables the delay.
    pub debug_delay: Duration,
}

impl Config {
    /// Checks the invariants the pipeline relies on.
    ///
    /// - `target` must be non-empty
    /// - `max_in_flight` must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(())
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `target = "Go"`
    /// - `max_in_flight = 5`
    /// - `http_timeout = 5s`
    /// - `max_redirects = 10`
    /// - `debug_text = "Text to find Go instance"`
    /// - `debug_delay = 1s`
    fn default() -> Self {
        Self {
            target: "Go".to_string(),
            max_in_flight: 5,
            http_timeout: Duration::from_secs(5),
            max_redirects: 10,
            debug_text: "Text to find Go instance".to_string(),
            debug_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.target, "Go");
        assert_eq!(cfg.max_in_flight, 5);
        assert_eq!(cfg.http_timeout, Duration::from_secs(5));
        assert_eq!(cfg.max_redirects, 10);
    }

    #[test]
    fn test_rejects_empty_target() {
        let cfg = Config {
            target: String::new(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyTarget)));
    }

    #[test]
    fn test_rejects_zero_limit() {
        let cfg = Config {
            max_in_flight: 0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroLimit)));
    }
}

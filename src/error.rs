//! Error types used by the wordvisor pipeline and its providers.
//!
//! This module defines three error enums:
//!
//! - [`ConfigError`] — invalid startup configuration (fatal, reported before the pipeline starts).
//! - [`ProviderError`] — a source could not be opened (recovered by the worker, counts as 0).
//! - [`CountError`] — a stream failed mid-read (recovered by the worker, keeps the partial count).
//!
//! All types provide an `as_label` helper returning a stable snake_case label for logs.

use std::io;

use thiserror::Error;

/// # Errors raised while assembling the pipeline.
///
/// These are the only errors that stop the process. Everything below this level
/// is recovered inside a worker and surfaces as a log line.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No provider kind was selected.
    #[error("type should be specified")]
    MissingProvider,

    /// Provider kind key is not one of `file`, `url`, `debug`.
    #[error("type '{kind}' isn't supported")]
    UnsupportedProvider {
        /// The rejected key.
        kind: String,
    },

    /// Target word is empty (substring counting would be meaningless).
    #[error("target word must not be empty")]
    EmptyTarget,

    /// Admission limit of zero would never admit anything.
    #[error("max in-flight limit must be at least 1")]
    ZeroLimit,

    /// The shared HTTP client could not be constructed.
    #[error("failed to build http client: {reason}")]
    HttpClient {
        /// Underlying builder error.
        reason: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use wordvisor::ConfigError;
    ///
    /// let err = ConfigError::UnsupportedProvider { kind: "ftp".into() };
    /// assert_eq!(err.as_label(), "config_unsupported_provider");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingProvider => "config_missing_provider",
            ConfigError::UnsupportedProvider { .. } => "config_unsupported_provider",
            ConfigError::EmptyTarget => "config_empty_target",
            ConfigError::ZeroLimit => "config_zero_limit",
            ConfigError::HttpClient { .. } => "config_http_client",
        }
    }
}

/// # Errors raised when a provider cannot open a source.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The source descriptor was empty.
    #[error("{provider}: source is empty")]
    EmptySource {
        /// Name of the provider that refused it.
        provider: &'static str,
    },

    /// Filesystem open failed (not found, permission denied, ...).
    #[error("failed to open '{source_name}': {error}")]
    Open {
        /// The source that failed.
        source_name: String,
        /// Underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// HTTP request failed (connect error, timeout, redirect limit, ...).
    #[error("request to '{source_name}' failed: {error}")]
    Request {
        /// The source that failed.
        source_name: String,
        /// Underlying transport error.
        #[source]
        error: reqwest::Error,
    },
}

impl ProviderError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ProviderError::EmptySource { .. } => "provider_empty_source",
            ProviderError::Open { .. } => "provider_open",
            ProviderError::Request { error, .. } if error.is_timeout() => "provider_timeout",
            ProviderError::Request { .. } => "provider_request",
        }
    }
}

/// # Errors raised while counting a stream.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CountError {
    /// Reading failed before end-of-data; `partial` matches were already counted.
    #[error("read failed after {partial} matches: {error}")]
    Read {
        /// Matches accumulated before the failure.
        partial: u64,
        /// Underlying I/O error.
        #[source]
        error: io::Error,
    },
}

impl CountError {
    /// Returns the count accumulated before the failure.
    pub fn partial(&self) -> u64 {
        match self {
            CountError::Read { partial, .. } => *partial,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            CountError::Read { .. } => "count_read",
        }
    }
}

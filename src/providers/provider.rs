//! # Provider abstraction and startup-time kind selection.
//!
//! This module defines the [`ContentProvider`] trait (async, shared) and the
//! [`ProviderKind`] key used to choose one implementation before the pipeline starts.
//! The common handle type is [`ProviderRef`], an `Arc<dyn ContentProvider>` suitable
//! for sharing across workers.

use std::fmt;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::config::Config;
use crate::error::{ConfigError, ProviderError};

use super::{DebugProvider, FileProvider, UrlProvider};

/// Readable byte stream handed out by a provider. Dropping it releases the resource.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// Shared handle to a provider.
pub type ProviderRef = Arc<dyn ContentProvider>;

/// # Source-opening capability.
///
/// Implementations must be safe for concurrent use by many workers; any shared
/// state (an HTTP client, a template) is read-only after construction.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use wordvisor::{ByteStream, ContentProvider, ProviderError};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl ContentProvider for Fixed {
///     fn name(&self) -> &'static str { "fixed" }
///
///     async fn open(&self, _source: &str) -> Result<ByteStream, ProviderError> {
///         Ok(Box::pin(&b"Go Go"[..]))
///     }
/// }
/// ```
#[async_trait]
pub trait ContentProvider: Send + Sync + 'static {
    /// Returns a stable, human-readable provider name.
    fn name(&self) -> &'static str;

    /// Opens `source` for reading.
    async fn open(&self, source: &str) -> Result<ByteStream, ProviderError>;
}

/// Closed set of provider kinds, selected once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    /// Local files, one path per source.
    File,
    /// HTTP(S) URLs fetched with GET.
    Url,
    /// Synthetic slow in-memory stream.
    Debug,
}

impl ProviderKind {
    /// All kinds, in the order they are listed in usage text.
    pub const ALL: [ProviderKind; 3] = [ProviderKind::File, ProviderKind::Url, ProviderKind::Debug];

    /// The key that selects this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::File => "file",
            ProviderKind::Url => "url",
            ProviderKind::Debug => "debug",
        }
    }

    /// Builds the provider for this kind from the global config.
    ///
    /// Only the `url` kind can fail (HTTP client construction).
    pub fn build(self, cfg: &Config) -> Result<ProviderRef, ConfigError> {
        Ok(match self {
            ProviderKind::File => Arc::new(FileProvider::new()),
            ProviderKind::Url => Arc::new(UrlProvider::new(cfg.http_timeout, cfg.max_redirects)?),
            ProviderKind::Debug => Arc::new(DebugProvider::new(
                cfg.debug_text.clone(),
                cfg.debug_delay,
            )),
        })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::MissingProvider);
        }
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedProvider { kind: s.to_string() })
    }
}

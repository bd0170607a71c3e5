//! Content providers.
//!
//! A provider turns a source descriptor into a readable byte stream. The
//! pipeline picks exactly one provider at startup from a closed set of kinds
//! and shares it, read-only, between all workers.
//!
//! ## Contents
//! - [`ContentProvider`] the capability: `open(source) → ByteStream`
//! - [`ProviderKind`] the closed set of kinds (`file`, `url`, `debug`)
//! - [`FileProvider`], [`UrlProvider`], [`DebugProvider`] the variants
//!
//! ## Release
//! Streams are released by dropping them: the file handle or HTTP connection is
//! closed when the [`ByteStream`] goes out of scope, on every exit path.

mod debug;
mod file;
mod provider;
mod url;

pub use debug::{DebugProvider, DebugStream};
pub use file::FileProvider;
pub use provider::{ByteStream, ContentProvider, ProviderKind, ProviderRef};
pub use url::UrlProvider;

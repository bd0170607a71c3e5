//! # File provider
//!
//! Opens each source as a local path with `tokio::fs`. The returned stream owns the
//! file handle; dropping it closes the file.

use async_trait::async_trait;
use tokio::fs::File;

use crate::error::ProviderError;

use super::provider::{ByteStream, ContentProvider};

/// Filesystem-backed provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileProvider;

impl FileProvider {
    /// Construct a new [`FileProvider`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentProvider for FileProvider {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn open(&self, source: &str) -> Result<ByteStream, ProviderError> {
        if source.is_empty() {
            return Err(ProviderError::EmptySource {
                provider: self.name(),
            });
        }

        let file = File::open(source)
            .await
            .map_err(|error| ProviderError::Open {
                source_name: source.to_string(),
                error,
            })?;
        Ok(Box::pin(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::count_words;
    use std::io::Write;

    #[tokio::test]
    async fn test_open_existing_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "Go is Good").unwrap();

        let path = tmp.path().to_str().unwrap().to_string();
        let stream = FileProvider::new().open(&path).await.unwrap();
        assert_eq!(count_words(stream, "Go").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let err = FileProvider::new()
            .open(path.to_str().unwrap())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::Open { .. }));
        assert_eq!(err.as_label(), "provider_open");
    }

    #[tokio::test]
    async fn test_empty_source_fails() {
        let err = FileProvider::new().open("").await.err().unwrap();
        assert!(matches!(err, ProviderError::EmptySource { provider: "file" }));
    }
}

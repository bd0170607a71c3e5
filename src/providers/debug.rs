//! # Debug provider
//!
//! Serves the same in-memory text for every source, slowly: every read first sleeps
//! for a fixed delay and then copies as many bytes as the caller's buffer holds.
//! It exists to exercise concurrency and backpressure under slow I/O.
//!
//! ```text
//! poll_read ──► sleep(delay) ──► copy min(remaining, buf) bytes
//!                                └─ nothing left → end-of-stream
//! ```

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, ReadBuf};
use tokio::time::{Sleep, sleep};

use crate::error::ProviderError;

use super::provider::{ByteStream, ContentProvider};

/// Synthetic, slow provider.
#[derive(Clone, Debug)]
pub struct DebugProvider {
    text: Arc<str>,
    delay: Duration,
}

impl DebugProvider {
    /// Creates a provider serving `text` with `delay` before each read.
    pub fn new(text: impl Into<Arc<str>>, delay: Duration) -> Self {
        Self {
            text: text.into(),
            delay,
        }
    }
}

#[async_trait]
impl ContentProvider for DebugProvider {
    fn name(&self) -> &'static str {
        "debug"
    }

    async fn open(&self, _source: &str) -> Result<ByteStream, ProviderError> {
        Ok(Box::pin(DebugStream::new(Arc::clone(&self.text), self.delay)))
    }
}

/// In-memory stream with an artificial delay before every read.
pub struct DebugStream {
    text: Arc<str>,
    pos: usize,
    delay: Duration,
    pending: Option<Pin<Box<Sleep>>>,
}

impl DebugStream {
    /// Creates a stream over `text`.
    pub fn new(text: Arc<str>, delay: Duration) -> Self {
        Self {
            text,
            pos: 0,
            delay,
            pending: None,
        }
    }
}

impl AsyncRead for DebugStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if !self.delay.is_zero() {
            let delay = self.delay;
            let timer = self.pending.get_or_insert_with(|| Box::pin(sleep(delay)));
            ready!(timer.as_mut().poll(cx));
            self.pending = None;
        }

        let this = &mut *self;
        let rest = &this.text.as_bytes()[this.pos..];
        let n = rest.len().min(buf.remaining());
        buf.put_slice(&rest[..n]);
        this.pos += n;
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::count_words;
    use tokio::io::AsyncReadExt;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_counts_default_text() {
        let provider = DebugProvider::new("Text to find Go instance", Duration::from_secs(1));
        let stream = provider.open("anything").await.unwrap();
        assert_eq!(count_words(stream, "Go").await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_read_is_delayed() {
        let mut stream = DebugStream::new(Arc::from("abcdef"), Duration::from_secs(1));
        let start = Instant::now();

        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).await.unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(stream.read(&mut buf).await.unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(stream.read(&mut buf).await.unwrap(), 0);

        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_zero_delay_reads_immediately() {
        let mut stream = DebugStream::new(Arc::from("Go Go"), Duration::ZERO);
        let mut out = String::new();
        stream.read_to_string(&mut out).await.unwrap();
        assert_eq!(out, "Go Go");
    }
}

//! # Worker: count one source.
//!
//! Executes one unit of work and always produces a count:
//!
//! ```text
//! source ──► empty?  ── yes ──► 0 (no provider call, no report line)
//!              │ no
//!              ▼
//!        provider.open ── Err ──► publish OpenFailed ──► 0
//!              │ Ok(stream)
//!              ▼
//!        count_words(stream) ── Err ──► publish ReadFailed ──► partial
//!              │ Ok(n)                   (stream dropped either way)
//!              ▼
//!        publish SourceCounted { source, count }
//! ```
//!
//! A panic anywhere in open or count is caught here, published as `WorkerPanicked`
//! for the source and counted as 0.
//!
//! ## Rules
//! - The stream is owned by `count_words` and released on every exit path
//! - Failures are logged through events and folded into the total as their count
//! - A single attempt per source, no retries

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::OwnedSemaphorePermit;

use crate::counter::count_words;
use crate::events::{Bus, Event, EventKind};
use crate::providers::ProviderRef;

/// What a finished worker hands back to the coordinator.
///
/// Holds the admission permit so capacity is returned exactly when the coordinator
/// receives the completion.
pub(crate) struct Completion {
    pub count: u64,
    pub permit: OwnedSemaphorePermit,
}

/// Shared, read-only context for all workers of one run.
#[derive(Clone)]
pub(crate) struct Worker {
    provider: ProviderRef,
    target: Arc<str>,
    bus: Bus,
}

impl Worker {
    pub(crate) fn new(provider: ProviderRef, target: Arc<str>, bus: Bus) -> Self {
        Self {
            provider,
            target,
            bus,
        }
    }

    /// Counts `source`, holding `permit` until the completion is received.
    pub(crate) async fn run(self, source: Arc<str>, permit: OwnedSemaphorePermit) -> Completion {
        let count = match AssertUnwindSafe(self.count(&source)).catch_unwind().await {
            Ok(count) => count,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                self.bus.publish(
                    Event::new(EventKind::WorkerPanicked)
                        .with_source(Arc::clone(&source))
                        .with_reason(reason),
                );
                self.bus.publish(
                    Event::new(EventKind::SourceCounted)
                        .with_source(source)
                        .with_count(0),
                );
                0
            }
        };
        Completion { count, permit }
    }

    async fn count(&self, source: &Arc<str>) -> u64 {
        if source.is_empty() {
            return 0;
        }

        let count = match self.provider.open(source).await {
            Ok(stream) => match count_words(stream, &self.target).await {
                Ok(n) => n,
                Err(e) => {
                    self.bus.publish(
                        Event::new(EventKind::ReadFailed)
                            .with_source(Arc::clone(source))
                            .with_count(e.partial())
                            .with_reason(e.to_string()),
                    );
                    e.partial()
                }
            },
            Err(e) => {
                self.bus.publish(
                    Event::new(EventKind::OpenFailed)
                        .with_source(Arc::clone(source))
                        .with_reason(e.to_string()),
                );
                0
            }
        };

        self.bus.publish(
            Event::new(EventKind::SourceCounted)
                .with_source(Arc::clone(source))
                .with_count(count),
        );
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::events::BusReceiver;
    use crate::providers::{ByteStream, ContentProvider, FileProvider};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    struct Counting {
        opened: AtomicUsize,
    }

    #[async_trait]
    impl ContentProvider for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn open(&self, _source: &str) -> Result<ByteStream, ProviderError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(Box::pin(&b"Google Go gopher"[..]))
        }
    }

    /// Yields `data` once, then fails.
    struct Broken {
        data: Option<&'static [u8]>,
    }

    impl tokio::io::AsyncRead for Broken {
        fn poll_read(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            match self.data.take() {
                Some(data) => {
                    buf.put_slice(data);
                    std::task::Poll::Ready(Ok(()))
                }
                None => std::task::Poll::Ready(Err(std::io::Error::other("connection reset"))),
            }
        }
    }

    struct Flaky;

    #[async_trait]
    impl ContentProvider for Flaky {
        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn open(&self, _source: &str) -> Result<ByteStream, ProviderError> {
            Ok(Box::pin(Broken {
                data: Some(b"Go Go trunc"),
            }))
        }
    }

    fn permit() -> OwnedSemaphorePermit {
        Arc::new(Semaphore::new(1)).try_acquire_owned().unwrap()
    }

    fn kinds(rx: &mut BusReceiver) -> Vec<EventKind> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev.kind);
        }
        out
    }

    #[tokio::test]
    async fn test_counts_and_reports() {
        let (bus, mut rx) = Bus::channel();
        let provider = Arc::new(Counting {
            opened: AtomicUsize::new(0),
        });
        let worker = Worker::new(provider.clone(), Arc::from("Go"), bus);

        let done = worker.run(Arc::from("src"), permit()).await;
        assert_eq!(done.count, 2);
        assert_eq!(provider.opened.load(Ordering::SeqCst), 1);
        assert_eq!(kinds(&mut rx), vec![EventKind::SourceCounted]);
    }

    #[tokio::test]
    async fn test_empty_source_skips_provider() {
        let (bus, mut rx) = Bus::channel();
        let provider = Arc::new(Counting {
            opened: AtomicUsize::new(0),
        });
        let worker = Worker::new(provider.clone(), Arc::from("Go"), bus);

        let done = worker.run(Arc::from(""), permit()).await;
        assert_eq!(done.count, 0);
        assert_eq!(provider.opened.load(Ordering::SeqCst), 0);
        assert!(kinds(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_open_failure_counts_zero_and_still_reports() {
        let (bus, mut rx) = Bus::channel();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let worker = Worker::new(Arc::new(FileProvider::new()), Arc::from("Go"), bus);

        let done = worker
            .run(Arc::from(missing.to_str().unwrap()), permit())
            .await;
        assert_eq!(done.count, 0);
        assert_eq!(
            kinds(&mut rx),
            vec![EventKind::OpenFailed, EventKind::SourceCounted]
        );
    }

    #[tokio::test]
    async fn test_read_failure_keeps_partial_count() {
        let (bus, mut rx) = Bus::channel();
        let worker = Worker::new(Arc::new(Flaky), Arc::from("Go"), bus);

        let done = worker.run(Arc::from("flaky"), permit()).await;
        assert_eq!(done.count, 2);
        assert_eq!(
            kinds(&mut rx),
            vec![EventKind::ReadFailed, EventKind::SourceCounted]
        );
    }

    struct Exploding;

    #[async_trait]
    impl ContentProvider for Exploding {
        fn name(&self) -> &'static str {
            "exploding"
        }

        async fn open(&self, source: &str) -> Result<ByteStream, ProviderError> {
            panic!("cannot open {source}");
        }
    }

    #[tokio::test]
    async fn test_panic_is_reported_and_counts_zero() {
        let (bus, mut rx) = Bus::channel();
        let gate = Arc::new(Semaphore::new(1));
        let worker = Worker::new(Arc::new(Exploding), Arc::from("Go"), bus);

        let done = worker
            .run(Arc::from("boom"), Arc::clone(&gate).try_acquire_owned().unwrap())
            .await;
        assert_eq!(done.count, 0);
        assert_eq!(gate.available_permits(), 0);
        drop(done);
        assert_eq!(gate.available_permits(), 1);

        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.kind, EventKind::WorkerPanicked);
        assert_eq!(ev.source.as_deref(), Some("boom"));
        assert_eq!(ev.reason.as_deref(), Some("cannot open boom"));
        assert_eq!(kinds(&mut rx), vec![EventKind::SourceCounted]);
    }
}

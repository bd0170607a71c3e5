//! # LineProducer: permission-gated line reader.
//!
//! Reads trimmed, non-empty lines from an input stream and hands them to the
//! coordinator one at a time. Before reading each line it waits for a grant.
//!
//! ## Protocol
//! ```text
//! loop {
//!   ├─► wait grant           (Notify permit, issued by the coordinator on admission)
//!   ├─► read lines until one is non-empty after trim, or EOF / error
//!   ├─► send candidate       (mpsc, capacity 1)
//!   └─► repeat
//! }
//! exit: publish ProducerExhausted (or ProducerFailed), return emitted count
//! ```
//!
//! ## Rules
//! - At most **one** emitted candidate is not yet admitted at any time
//! - Blank lines are skipped without consuming an extra grant
//! - Lines are raw bytes; invalid UTF-8 is replaced, never rejected
//! - An input error ends the stream like EOF (logged, not fatal)

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{Notify, mpsc};

use crate::events::{Bus, Event, EventKind};

/// Emits source descriptors from `reader`, gated by `grant`.
pub(crate) struct LineProducer<R> {
    reader: R,
    candidates: mpsc::Sender<String>,
    grant: Arc<Notify>,
    bus: Bus,
}

impl<R> LineProducer<R>
where
    R: AsyncBufRead + Unpin,
{
    pub(crate) fn new(
        reader: R,
        candidates: mpsc::Sender<String>,
        grant: Arc<Notify>,
        bus: Bus,
    ) -> Self {
        Self {
            reader,
            candidates,
            grant,
            bus,
        }
    }

    /// Runs until the input is exhausted or the coordinator hangs up.
    ///
    /// Returns the number of candidates emitted. Dropping the candidate sender on
    /// return is not the exhaustion signal; the caller's join handle is.
    pub(crate) async fn run(self) -> u64 {
        let mut reader = self.reader;
        let mut buf = Vec::new();
        let mut emitted = 0u64;

        loop {
            self.grant.notified().await;

            let source = loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => break None,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf);
                        let trimmed = line.trim();
                        if !trimmed.is_empty() {
                            break Some(trimmed.to_string());
                        }
                    }
                    Err(e) => {
                        self.bus.publish(
                            Event::new(EventKind::ProducerFailed).with_reason(e.to_string()),
                        );
                        break None;
                    }
                }
            };

            let Some(source) = source else { break };
            if self.candidates.send(source).await.is_err() {
                break;
            }
            emitted += 1;
        }

        self.bus
            .publish(Event::new(EventKind::ProducerExhausted).with_count(emitted));
        emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    fn producer(
        input: &'static str,
    ) -> (
        LineProducer<Cursor<&'static [u8]>>,
        mpsc::Receiver<String>,
        Arc<Notify>,
    ) {
        let (bus, _rx) = Bus::channel();
        let (tx, rx) = mpsc::channel(1);
        let grant = Arc::new(Notify::new());
        let p = LineProducer::new(Cursor::new(input.as_bytes()), tx, Arc::clone(&grant), bus);
        (p, rx, grant)
    }

    #[tokio::test]
    async fn test_waits_for_grant_before_each_line() {
        let (p, mut rx, grant) = producer("a\nb\n");
        let handle = tokio::spawn(p.run());

        // Nothing is read without a grant.
        let none = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(none.is_err());

        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("a"));

        // Still blocked on the second grant.
        let none = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(none.is_err());

        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("b"));

        grant.notify_one();
        assert_eq!(handle.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_trims_and_skips_blank_lines() {
        let (p, mut rx, grant) = producer("  first  \n\n   \n\tsecond\n");
        let handle = tokio::spawn(p.run());

        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("first"));
        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("second"));
        grant.notify_one();
        assert_eq!(handle.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let (p, mut rx, grant) = producer("only");
        let handle = tokio::spawn(p.run());

        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("only"));
        grant.notify_one();
        assert_eq!(handle.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_input() {
        let (bus, _rx) = Bus::channel();
        let (tx, mut rx) = mpsc::channel(1);
        let grant = Arc::new(Notify::new());
        let input: &'static [u8] = b"a\ncaf\xE9.txt\nb\n";
        let p = LineProducer::new(Cursor::new(input), tx, Arc::clone(&grant), bus);
        let handle = tokio::spawn(p.run());

        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("a"));
        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("caf\u{FFFD}.txt"));
        grant.notify_one();
        assert_eq!(rx.recv().await.as_deref(), Some("b"));
        grant.notify_one();
        assert_eq!(handle.await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_empty_input_exhausts_after_first_grant() {
        let (p, _rx, grant) = producer("");
        grant.notify_one();
        assert_eq!(p.run().await, 0);
    }
}

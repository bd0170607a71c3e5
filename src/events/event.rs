//! # Runtime events emitted by the coordinator, the producer and workers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Admission events**: what the coordinator did with a candidate (admitted, deferred)
//! - **Source events**: per-source outcome (counted, open failed, read failed, panicked)
//! - **Lifecycle events**: producer exhaustion and the final total
//!
//! The [`Event`] struct carries additional metadata such as timestamps, source name,
//! counts and reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use wordvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::SourceCounted)
//!     .with_source("notes.txt")
//!     .with_count(3);
//!
//! assert_eq!(ev.kind, EventKind::SourceCounted);
//! assert_eq!(ev.source.as_deref(), Some("notes.txt"));
//! assert_eq!(ev.count, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of pipeline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Admission events ===
    /// Candidate admitted and handed to a worker.
    ///
    /// Sets:
    /// - `source`: source descriptor
    /// - `in_flight`: workers executing after this admission
    SourceAdmitted,

    /// Admission saturated; candidate parked in the pending slot.
    ///
    /// Sets:
    /// - `source`: source descriptor
    /// - `in_flight`: workers executing (equals the limit)
    SourceDeferred,

    // === Source events ===
    /// Worker finished a source (also emitted with `count = 0` after an open failure or panic).
    ///
    /// Sets:
    /// - `source`: source descriptor
    /// - `count`: matches found
    SourceCounted,

    /// Provider could not open the source.
    ///
    /// Sets:
    /// - `source`: source descriptor
    /// - `reason`: error message
    OpenFailed,

    /// Stream failed before end-of-data.
    ///
    /// Sets:
    /// - `source`: source descriptor
    /// - `count`: partial count kept
    /// - `reason`: error message
    ReadFailed,

    /// Worker panicked while opening or counting; its source contributes 0.
    ///
    /// Sets:
    /// - `source`: source descriptor (absent if the task itself was lost)
    /// - `reason`: panic info
    WorkerPanicked,

    // === Lifecycle events ===
    /// Producer reached end of input.
    ///
    /// Sets:
    /// - `count`: number of candidates emitted
    ProducerExhausted,

    /// Producer hit an input error; treated as end of input.
    ///
    /// Sets:
    /// - `reason`: error message
    ProducerFailed,

    /// Coordinator loop terminated; always the last event of a run.
    ///
    /// Sets:
    /// - `count`: running total
    PipelineFinished,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: panic info
    SubscriberPanicked,
}

/// Pipeline event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Source descriptor (or subscriber name), if applicable.
    pub source: Option<Arc<str>>,
    /// Match count or total, if applicable.
    pub count: Option<u64>,
    /// Workers executing when the event was emitted.
    pub in_flight: Option<usize>,
    /// Human-readable reason (errors, panic details).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            source: None,
            count: None,
            in_flight: None,
            reason: None,
        }
    }

    /// Attaches a source descriptor.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches a count.
    #[inline]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Attaches the in-flight gauge.
    #[inline]
    pub fn with_in_flight(mut self, n: usize) -> Self {
        self.in_flight = Some(n);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_source(subscriber)
            .with_reason(info)
    }

    /// True for the last event of a run.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::PipelineFinished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = Event::new(EventKind::SourceAdmitted);
        let b = Event::new(EventKind::SourceAdmitted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_only_finish_is_terminal() {
        assert!(Event::new(EventKind::PipelineFinished).is_terminal());
        assert!(!Event::new(EventKind::ProducerExhausted).is_terminal());
    }
}

//! # Event bus for publishing pipeline events.
//!
//! [`Bus`] is a thin wrapper around an unbounded [`tokio::sync::mpsc`] channel that
//! provides non-blocking event publishing from many sources (coordinator, producer, workers).
//!
//! ## Architecture
//! ```text
//! Publishers (many):                   Consumer (one):
//!   Worker 1    ──┐
//!   Worker K    ──┼──────► Bus ───────► pipeline listener ────► SubscriberSet
//!   Producer    ──┤  (unbounded mpsc)
//!   Coordinator ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits.
//! - **Lossless**: every published event reaches the listener while it is alive.
//! - **Total order**: the listener observes events in the order `publish()` calls completed.
//! - **No persistence**: events published after the listener stopped are dropped.

use tokio::sync::mpsc;

use super::event::Event;

/// Receiving half owned by the pipeline listener.
pub(crate) type BusReceiver = mpsc::UnboundedReceiver<Event>;

/// Channel for pipeline events.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Fire-and-forget**: a closed listener silently drops events.
/// - **Cloneable**: cheap to clone (internally an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: mpsc::UnboundedSender<Event>,
}

impl Bus {
    /// Creates a bus and the receiver that observes everything published on it.
    pub(crate) fn channel() -> (Self, BusReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publishes an event to the listener.
    ///
    /// If the listener has already stopped, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn test_publish_preserves_order() {
        let (bus, mut rx) = Bus::channel();
        let other = bus.clone();

        bus.publish(Event::new(EventKind::SourceAdmitted).with_source("a"));
        other.publish(Event::new(EventKind::SourceAdmitted).with_source("b"));

        let first = rx.try_recv().expect("first event");
        let second = rx.try_recv().expect("second event");
        assert_eq!(first.source.as_deref(), Some("a"));
        assert_eq!(second.source.as_deref(), Some("b"));
        assert!(first.seq < second.seq);
    }

    #[test]
    fn test_publish_after_close_is_silent() {
        let (bus, rx) = Bus::channel();
        drop(rx);
        bus.publish(Event::new(EventKind::ProducerExhausted));
    }
}

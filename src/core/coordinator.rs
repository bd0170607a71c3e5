//! # Coordinator: admission, backpressure and fan-in.
//!
//! Single-threaded event loop that owns all mutable run state: the admission gate,
//! the pending slot, the running total and the producer liveness flag.
//!
//! ## State machine
//! ```text
//! AWAITING_INPUT_OR_COMPLETION
//!   select {
//!     candidate(src) ──► gate has a permit?
//!                          ├─ yes → grant producer, spawn worker(src, permit)
//!                          └─ no  → pending = Some(src)          (no grant)
//!     producer done  ──► producer_live = false
//!     completion(n)  ──► total += n, release permit
//!                        └─ pending.take() → treat as candidate (grants on admission)
//!   }
//!   exit when !producer_live && no worker outstanding ──► DONE (emit total)
//! ```
//!
//! ## Rules
//! - `in_flight = K - gate.available_permits()`, so `0 ≤ in_flight ≤ K` holds by construction
//! - A grant is issued **only** when a candidate is admitted; the producer therefore
//!   never has more than one unadmitted candidate and one pending slot is enough
//! - `total` and `pending` are touched only by this loop (no locks)

use std::sync::Arc;

use tokio::sync::{Notify, Semaphore, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};

use crate::events::{Bus, Event, EventKind};

use super::worker::{Completion, Worker};

/// Result of one pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Sum of every source's count.
    pub total: u64,
    /// Number of workers dispatched (one per non-empty input line).
    pub dispatched: u64,
    /// Highest number of workers executing at the same time.
    pub peak_in_flight: usize,
}

/// Coordinator state, owned by the loop in [`Coordinator::run`].
pub(crate) struct Coordinator {
    limit: usize,
    gate: Arc<Semaphore>,
    grant: Arc<Notify>,
    worker: Worker,
    workers: JoinSet<Completion>,
    pending: Option<String>,
    producer_live: bool,
    summary: Summary,
    bus: Bus,
}

impl Coordinator {
    pub(crate) fn new(limit: usize, grant: Arc<Notify>, worker: Worker, bus: Bus) -> Self {
        Self {
            limit,
            gate: Arc::new(Semaphore::new(limit)),
            grant,
            worker,
            workers: JoinSet::new(),
            pending: None,
            producer_live: true,
            summary: Summary::default(),
            bus,
        }
    }

    /// Workers currently holding an admission permit.
    fn in_flight(&self) -> usize {
        self.limit - self.gate.available_permits()
    }

    /// Drives the loop until the producer is exhausted and every worker reported.
    ///
    /// `candidates` is the producer's single-slot handoff; `producer` is its join
    /// handle, which doubles as the exhaustion signal.
    pub(crate) async fn run(
        mut self,
        mut candidates: mpsc::Receiver<String>,
        mut producer: JoinHandle<u64>,
    ) -> Summary {
        // First permission: let the producer read its first line.
        self.grant.notify_one();

        while self.producer_live || !self.workers.is_empty() {
            tokio::select! {
                Some(source) = candidates.recv() => self.on_candidate(source),
                exit = &mut producer, if self.producer_live => self.on_producer_exit(exit),
                Some(joined) = self.workers.join_next(), if !self.workers.is_empty() => {
                    self.on_completion(joined);
                }
                else => break,
            }
        }

        debug_assert!(self.pending.is_none(), "pending slot not drained");
        debug_assert_eq!(self.in_flight(), 0);
        self.summary
    }

    /// New candidate (fresh from the producer or re-injected from the pending slot).
    fn on_candidate(&mut self, source: String) {
        match Arc::clone(&self.gate).try_acquire_owned() {
            Ok(permit) => {
                self.grant.notify_one();

                let source: Arc<str> = Arc::from(source);
                let worker = self.worker.clone();
                self.workers.spawn(worker.run(Arc::clone(&source), permit));

                let in_flight = self.in_flight();
                self.summary.dispatched += 1;
                self.summary.peak_in_flight = self.summary.peak_in_flight.max(in_flight);
                self.bus.publish(
                    Event::new(EventKind::SourceAdmitted)
                        .with_source(source)
                        .with_in_flight(in_flight),
                );
            }
            Err(_) => {
                debug_assert!(
                    self.pending.is_none(),
                    "producer emitted a second candidate without a grant"
                );
                self.bus.publish(
                    Event::new(EventKind::SourceDeferred)
                        .with_source(source.as_str())
                        .with_in_flight(self.in_flight()),
                );
                self.pending = Some(source);
            }
        }
    }

    fn on_producer_exit(&mut self, exit: Result<u64, JoinError>) {
        self.producer_live = false;
        if let Err(e) = exit {
            self.bus
                .publish(Event::new(EventKind::ProducerFailed).with_reason(e.to_string()));
        }
    }

    fn on_completion(&mut self, joined: Result<Completion, JoinError>) {
        match joined {
            Ok(Completion { count, permit }) => {
                self.summary.total += count;
                drop(permit);
            }
            // Workers catch their own panics; this only sees a task lost outside them.
            // Its permit was released when the task was dropped.
            Err(e) => {
                self.bus
                    .publish(Event::new(EventKind::WorkerPanicked).with_reason(e.to_string()));
            }
        }

        if let Some(source) = self.pending.take() {
            self.on_candidate(source);
        }
    }
}

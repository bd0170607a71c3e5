//! # Pipeline: wires producer, coordinator, workers and subscribers for one run.
//!
//! ## High-level architecture
//! ```text
//! Inputs to run():
//!   AsyncBufRead (stdin, file, in-memory)  ──►  Pipeline::run(input)
//!
//! Preparation:
//!   - Bus::channel()                     (lossless event channel)
//!   - listener: Bus ─► SubscriberSet::emit(Event)  until PipelineFinished
//!   - LineProducer spawned               (waits for the first grant)
//!
//! Run:
//!   LineProducer ── candidate (cap 1) ──► Coordinator ── spawn ──► Worker × ≤K
//!        ▲                                   │   ▲                   │
//!        └──────────── grant (Notify) ───────┘   └── Completion ─────┘
//!
//! Finish:
//!   Coordinator returns Summary
//!     └─► Bus.publish(PipelineFinished { total })
//!     └─► listener forwards it, then SubscriberSet::shutdown() drains every queue
//!     └─► run() returns Summary
//! ```

use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::events::{Bus, BusReceiver, Event, EventKind};
use crate::providers::ProviderRef;
use crate::subscribers::{Subscribe, SubscriberSet};

use super::builder::PipelineBuilder;
use super::coordinator::{Coordinator, Summary};
use super::producer::LineProducer;
use super::worker::Worker;

/// A configured word-counting pipeline, ready to consume one input stream.
pub struct Pipeline {
    cfg: Config,
    provider: ProviderRef,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl Pipeline {
    /// Starts building a pipeline from `cfg`.
    pub fn builder(cfg: Config) -> PipelineBuilder {
        PipelineBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        provider: ProviderRef,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        Self {
            cfg,
            provider,
            subscribers,
        }
    }

    /// Returns the configuration this pipeline runs with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Consumes `input` line by line until it is exhausted and every admitted
    /// source has been counted.
    ///
    /// Never fails: per-source errors are reported as events and counted as 0.
    /// When this returns, every subscriber has processed every event of the run.
    pub async fn run<R>(self, input: R) -> Summary
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (bus, rx) = Bus::channel();
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let listener = subscriber_listener(rx, subs);

        let grant = Arc::new(Notify::new());
        let (tx, candidates) = mpsc::channel::<String>(1);
        let producer = tokio::spawn(
            LineProducer::new(input, tx, Arc::clone(&grant), bus.clone()).run(),
        );

        let worker = Worker::new(self.provider, Arc::from(self.cfg.target.as_str()), bus.clone());
        let coordinator = Coordinator::new(self.cfg.max_in_flight, grant, worker, bus.clone());
        let summary = coordinator.run(candidates, producer).await;

        bus.publish(Event::new(EventKind::PipelineFinished).with_count(summary.total));
        drop(bus);
        if let Err(e) = listener.await {
            tracing::error!(error = %e, "subscriber listener failed");
        }
        summary
    }
}

/// Forwards bus events to the subscriber set until the run's last event, then
/// drains the subscribers.
fn subscriber_listener(mut rx: BusReceiver, subs: SubscriberSet) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let last = ev.is_terminal();
            subs.emit(ev).await;
            if last {
                break;
            }
        }
        subs.shutdown().await;
    })
}

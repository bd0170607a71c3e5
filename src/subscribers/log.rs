//! # LogWriter — events to `tracing` records
//!
//! Maps every pipeline [`Event`] to a structured `tracing` record. The binary
//! installs a `tracing-subscriber` formatter on stderr, so these records never mix
//! with the report lines printed on stdout.
//!
//! ## Levels
//! ```text
//! SourceAdmitted / SourceDeferred / SourceCounted / ProducerExhausted → debug
//! PipelineFinished                                                   → info
//! ProducerFailed                                                     → warn
//! OpenFailed / ReadFailed / WorkerPanicked / SubscriberPanicked      → error
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let source = e.source.as_deref().unwrap_or("");
        let reason = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::SourceAdmitted => {
                debug!(seq = e.seq, source, in_flight = e.in_flight, "admitted");
            }
            EventKind::SourceDeferred => {
                debug!(seq = e.seq, source, in_flight = e.in_flight, "deferred to pending slot");
            }
            EventKind::SourceCounted => {
                debug!(seq = e.seq, source, count = e.count, "counted");
            }
            EventKind::OpenFailed => {
                error!(seq = e.seq, source, reason, "on getting reader");
            }
            EventKind::ReadFailed => {
                error!(seq = e.seq, source, partial = e.count, reason, "on string reading");
            }
            EventKind::WorkerPanicked => {
                error!(seq = e.seq, source, reason, "worker panicked");
            }
            EventKind::ProducerExhausted => {
                debug!(seq = e.seq, emitted = e.count, "input exhausted");
            }
            EventKind::ProducerFailed => {
                warn!(seq = e.seq, reason, "on input reading");
            }
            EventKind::PipelineFinished => {
                info!(seq = e.seq, total = e.count, "pipeline finished");
            }
            EventKind::SubscriberPanicked => {
                error!(seq = e.seq, subscriber = source, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

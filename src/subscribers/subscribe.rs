//! # Event subscribers
//!
//! A [`Subscribe`] implementation sees every event of a run, in publish order.
//! The pipeline gives each one its own queue and task, so a slow subscriber only
//! delays itself and the listener feeding it; no event is ever skipped.
//!
//! When [`Pipeline::run`](crate::Pipeline::run) returns, every subscriber has
//! already handled the final `PipelineFinished` event.
//!
//! ```rust
//! use wordvisor::{Event, EventKind, Subscribe};
//!
//! struct FailedSources;
//!
//! #[async_trait::async_trait]
//! impl Subscribe for FailedSources {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::OpenFailed {
//!             eprintln!("skipped {}", ev.source.as_deref().unwrap_or("?"));
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "failed-sources"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Receives pipeline events.
///
/// A panic inside `on_event` is caught and reported as `SubscriberPanicked`;
/// the subscriber keeps receiving later events.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event. Runs on this subscriber's own task.
    async fn on_event(&self, event: &Event);

    /// Name used in logs and panic reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// How many events may wait for this subscriber before the listener blocks.
    fn queue_capacity(&self) -> usize {
        1024
    }
}

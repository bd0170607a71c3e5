//! # Event subscribers for the wordvisor pipeline.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! the built-in subscribers used by the binary.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Worker ── publish(Event) ──► Bus ──► pipeline listener ──► SubscriberSet::emit(Event)
//!                                                                  │
//!                                                         ┌────────┴────────┐
//!                                                         ▼                 ▼
//!                                                     LogWriter        ReportWriter
//!                                                  (tracing, stderr)  (result lines, stdout)
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use wordvisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct Failures;
//!
//! #[async_trait]
//! impl Subscribe for Failures {
//!     async fn on_event(&self, event: &Event) {
//!         if let EventKind::OpenFailed = event.kind {
//!             // increment failure counter
//!         }
//!     }
//! }
//! ```

mod log;
mod report;
mod subscribe;
mod subscriber_set;

pub use log::LogWriter;
pub use report::ReportWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;

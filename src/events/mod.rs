//! Pipeline events: types and the internal bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish runtime events emitted by the coordinator, the line producer,
//! workers and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over an unbounded `tokio::sync::mpsc` sender
//!
//! ## Quick reference
//! - **Publishers**: `Coordinator`, `LineProducer`, `Worker`,
//!   `SubscriberSet` workers (panics).
//! - **Consumer**: the pipeline listener, which fans out to `SubscriberSet`.

mod bus;
mod event;

pub use bus::Bus;
pub(crate) use bus::BusReceiver;
pub use event::{Event, EventKind};

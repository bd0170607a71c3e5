//! # wordvisor
//!
//! **wordvisor** counts occurrences of a target word across a live stream of
//! sources (file paths, URLs or synthetic test sources), one source per input line.
//!
//! Each source is counted by its own async worker. A single coordinator admits
//! at most `K` workers at a time and pushes back on the line reader when the
//! limit is reached, without queueing more than one unadmitted line.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   stdin / any AsyncBufRead
//!            │ lines
//!            ▼
//!   ┌──────────────────┐  candidate (cap 1)  ┌────────────────────────────────┐
//!   │   LineProducer   │ ──────────────────► │          Coordinator           │
//!   │ (waits for grant)│ ◄────────────────── │  - admission gate (K permits)  │
//!   └──────────────────┘    grant (Notify)   │  - pending slot (0 or 1 line)  │
//!                                            │  - running total               │
//!                                            └───────┬────────────────▲───────┘
//!                                      spawn(permit) │                │ Completion
//!                                                    ▼                │ (count, permit)
//!                                  ┌────────────┐ ┌────────────┐ ┌────────────┐
//!                                  │  Worker 1  │ │  Worker 2  │ │  Worker K  │
//!                                  │ open+count │ │ open+count │ │ open+count │
//!                                  └─────┬──────┘ └─────┬──────┘ └─────┬──────┘
//!                                        │  ContentProvider (file | url | debug)
//!                                        ▼
//!                      Bus (events) ──► SubscriberSet ──► LogWriter / ReportWriter
//! ```
//!
//! ### Lifecycle
//! ```text
//! grant first line
//! loop {
//!   ├─► candidate     → permit free?  yes → grant, spawn worker
//!   │                                 no  → park in pending slot
//!   ├─► producer done → producer_live = false
//!   └─► completion    → total += count, release permit, re-admit pending
//! } until !producer_live && no worker outstanding
//! publish PipelineFinished { total }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Pipeline**      | Bounded, backpressured fan-out and fan-in.                   | [`Pipeline`], [`PipelineBuilder`], [`Summary`] |
//! | **Providers**     | Turn a source descriptor into a byte stream.                 | [`ContentProvider`], [`ProviderKind`]       |
//! | **Counting**      | Space-delimited substring counting.                          | [`count_words`]                             |
//! | **Subscriber API**| Hook into pipeline events (logging, reporting, custom).      | [`Subscribe`], [`LogWriter`], [`ReportWriter`] |
//! | **Errors**        | Typed errors for configuration, providers and counting.      | [`ConfigError`], [`ProviderError`], [`CountError`] |
//! | **Configuration** | Centralize runtime settings.                                 | [`Config`]                                  |
//!
//! ## Example
//! ```rust
//! use std::io::Cursor;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use wordvisor::{Config, Pipeline, ProviderKind, ReportWriter, Subscribe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.max_in_flight = 2;
//!     cfg.debug_delay = Duration::ZERO;
//!
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(ReportWriter::new())];
//!     let pipeline = Pipeline::builder(cfg)
//!         .with_provider_kind(ProviderKind::Debug)
//!         .with_subscribers(subs)
//!         .build()?;
//!
//!     let summary = pipeline.run(Cursor::new(b"first\nsecond\n".to_vec())).await;
//!     assert_eq!(summary.total, 2);
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod counter;
mod error;
mod events;
mod providers;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use crate::core::{Pipeline, PipelineBuilder, Summary};
pub use counter::count_words;
pub use error::{ConfigError, CountError, ProviderError};
pub use events::{Event, EventKind};
pub use providers::{
    ByteStream, ContentProvider, DebugProvider, DebugStream, FileProvider, ProviderKind,
    ProviderRef, UrlProvider,
};
pub use subscribers::{LogWriter, ReportWriter, Subscribe};

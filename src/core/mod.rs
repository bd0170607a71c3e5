//! Pipeline core: producer, coordinator, workers.
//!
//! The only public API from this module is [`Pipeline`] (with its builder) and
//! the [`Summary`] it returns.
//!
//! Internal modules:
//! - [`producer`]: reads input lines, one per grant;
//! - [`coordinator`]: admission gate, pending slot, running total;
//! - [`worker`]: opens one source, counts, reports;
//! - [`pipeline`]: wires the above with the event bus and subscribers;
//! - [`builder`]: validates config and resolves the provider.

mod builder;
mod coordinator;
mod pipeline;
mod producer;
mod worker;


pub use builder::PipelineBuilder;
pub use coordinator::Summary;
pub use pipeline::Pipeline;
